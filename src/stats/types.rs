use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One logged instance of a profile finishing an exercise within a training
/// session. Deserialized straight off the backend feed; fields the views do
/// not read are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub exercise_description: String,
    #[serde(default)]
    pub body_category_name: Option<String>,
    #[serde(default)]
    pub training_day: Option<NaiveDate>,
}

/// One logged instance of a profile finishing a whole training plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanCompletion {
    pub training_plan_name: String,
    #[serde(default)]
    pub training_day: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameCount {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCount {
    pub day: NaiveDate,
    pub count: u32,
}

/// The four dashboard views plus the headline numbers, recomputed wholesale
/// per batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_completions: usize,
    pub completions_this_week: usize,
    pub favorite_exercise: String,
    pub daily_counts: Vec<DailyCount>,
    pub top_exercises: Vec<NameCount>,
    pub top_plans: Vec<NameCount>,
    pub category_distribution: Vec<NameCount>,
}
