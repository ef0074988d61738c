use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Food log of one day with its nutritional summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodLog {
    #[serde(default)]
    pub foods: Vec<FoodEntry>,
    #[serde(default)]
    pub goals: Option<FoodGoals>,
    pub summary: FoodTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    pub log_id: u64,
    pub log_date: NaiveDate,
    #[serde(default)]
    pub is_favorite: bool,
    pub logged_food: LoggedFood,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedFood {
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    pub amount: f64,
    pub calories: u32,
    #[serde(default)]
    pub meal_type_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodGoals {
    pub calories: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodTotals {
    pub calories: u32,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub sodium: f64,
    #[serde(default)]
    pub water: f64,
}
