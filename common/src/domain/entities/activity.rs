use serde::{Deserialize, Serialize};

/// Daily activity summary as returned by the provider for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    #[serde(default)]
    pub activities: Vec<ActivityLog>,
    #[serde(default)]
    pub goals: Option<ActivityGoals>,
    pub summary: ActivityTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub log_id: u64,
    pub name: String,
    #[serde(default)]
    pub calories: u32,
    /// Milliseconds
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub steps: Option<u32>,
    #[serde(default)]
    pub start_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityGoals {
    #[serde(default)]
    pub steps: u32,
    #[serde(default)]
    pub calories_out: u32,
    #[serde(default)]
    pub active_minutes: u32,
    #[serde(default)]
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTotals {
    pub steps: u32,
    #[serde(default)]
    pub calories_out: u32,
    #[serde(default)]
    pub activity_calories: u32,
    #[serde(default)]
    pub sedentary_minutes: u32,
    #[serde(default)]
    pub lightly_active_minutes: u32,
    #[serde(default)]
    pub fairly_active_minutes: u32,
    #[serde(default)]
    pub very_active_minutes: u32,
    #[serde(default)]
    pub resting_heart_rate: Option<u32>,
    #[serde(default)]
    pub distances: Vec<ActivityDistance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDistance {
    pub activity: String,
    pub distance: f64,
}
