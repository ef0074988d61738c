use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sleep logs of one night plus the provider's aggregate for that night
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepSummary {
    #[serde(default)]
    pub sleep: Vec<SleepLog>,
    pub summary: SleepTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepLog {
    pub log_id: u64,
    pub date_of_sleep: NaiveDate,
    /// Milliseconds
    pub duration: u64,
    #[serde(default)]
    pub efficiency: u32,
    #[serde(default)]
    pub is_main_sleep: bool,
    #[serde(default)]
    pub minutes_asleep: u32,
    #[serde(default)]
    pub minutes_awake: u32,
    #[serde(default)]
    pub time_in_bed: u32,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepTotals {
    pub total_minutes_asleep: u32,
    #[serde(default)]
    pub total_sleep_records: u32,
    #[serde(default)]
    pub total_time_in_bed: u32,
    #[serde(default)]
    pub stages: Option<SleepStages>,
}

/// Minutes spent in each stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepStages {
    pub deep: u32,
    pub light: u32,
    pub rem: u32,
    pub wake: u32,
}
