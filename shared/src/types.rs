//! API request and response types

use crate::goals::GoalPlan;
use crate::metrics::MacroGrams;
use crate::models::Goal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

// ============================================================================
// Daily Metrics Types
// ============================================================================

/// Query parameters for the daily metrics endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsQuery {
    /// `YYYY-MM-DD`, defaults to today
    #[serde(default)]
    pub date: Option<String>,
    /// Overrides the stored macro style for this request
    #[serde(default)]
    pub macro_style: Option<String>,
}

/// One user's energy picture for one date
///
/// Calorie figures are whole kcal; macro grams keep one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub bmi: f64,
    pub bmr: i32,
    pub tdee: i32,
    pub target_calories: i32,
    pub macros: MacroGrams,
    pub macros_consumed: MacroGrams,
    pub remaining_calories: i32,
    pub calories_burned: i32,
    pub calories_consumed: i32,
    pub water_intake_ml: i64,
}

// ============================================================================
// Goal Types
// ============================================================================

/// Weight goal creation request (target weight in any supported unit)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGoalRequest {
    #[validate(range(min = 1.0, max = 1500.0, message = "Target weight is out of range"))]
    pub target_weight: f64,
    /// kg (default), lbs or stone
    #[serde(default)]
    pub unit: Option<String>,
    pub goal_direction: String,
    #[validate(range(min = 0.0, max = 5.0, message = "Weekly rate must be between 0 and 5 kg"))]
    pub weekly_rate: f64,
    #[validate(range(min = 1, max = 520, message = "Duration must be between 1 and 520 weeks"))]
    pub duration_weeks: i32,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

/// Stored goal as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalResponse {
    pub id: String,
    pub goal_type: String,
    pub target_weight_kg: f64,
    pub goal_direction: String,
    pub weekly_rate_kg: f64,
    pub duration_weeks: i32,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<&Goal> for GoalResponse {
    fn from(goal: &Goal) -> Self {
        Self {
            id: goal.id.to_string(),
            goal_type: goal.goal_type.clone(),
            target_weight_kg: goal.target_weight_kg,
            goal_direction: goal.direction.as_str().to_string(),
            weekly_rate_kg: goal.weekly_rate_kg,
            duration_weeks: goal.duration_weeks,
            start_date: goal.start_date,
            target_date: goal.target_date(),
            created_at: goal.created_at,
        }
    }
}

/// Created goal plus the energy figures it was checked against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalSummaryResponse {
    pub goal: GoalResponse,
    pub bmr: i32,
    pub tdee: i32,
    pub daily_adjustment: i32,
    pub calorie_floor: i32,
    pub target_calories: i32,
}

impl GoalSummaryResponse {
    pub fn new(goal: &Goal, plan: GoalPlan) -> Self {
        Self {
            goal: GoalResponse::from(goal),
            bmr: plan.bmr,
            tdee: plan.tdee,
            daily_adjustment: plan.daily_adjustment,
            calorie_floor: plan.calorie_floor,
            target_calories: plan.target_calories,
        }
    }
}
