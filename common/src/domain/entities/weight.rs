use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weight log of a date range: one entry per weighing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightLog {
    #[serde(default)]
    pub weight: Vec<WeightSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightSample {
    pub log_id: u64,
    /// Day the sample was taken
    pub date: NaiveDate,
    #[serde(default)]
    pub time: Option<String>,
    pub weight: f64,
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub source: Option<String>,
}
