//! Data models for the nutrition tracker

use crate::errors::{DomainError, DomainResult};
use crate::metrics::{Gender, GoalDirection, MacroStyle};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body profile as stored
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Profile {
    pub user_id: Uuid,
    pub height_cm: Option<f64>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
}

/// Profile with every field the energy formulas need
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompleteProfile {
    pub height_cm: f64,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
}

impl Profile {
    /// Check that height and date of birth are present and usable
    pub fn require_complete(&self) -> DomainResult<CompleteProfile> {
        match (self.height_cm, self.date_of_birth) {
            (Some(height_cm), Some(date_of_birth)) if height_cm > 0.0 => Ok(CompleteProfile {
                height_cm,
                date_of_birth,
                gender: Gender::from_profile(self.gender.as_deref()),
            }),
            _ => Err(DomainError::validation("missing height/DOB")),
        }
    }
}

/// A logged body weight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightSample {
    pub weight_kg: f64,
    pub logged_at: DateTime<Utc>,
}

/// Per-user settings the engine reads and writes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub user_id: Uuid,
    /// Last computed calorie target, refreshed by every metrics computation
    pub default_target_calories: Option<i32>,
    pub macro_style: MacroStyle,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            user_id: Uuid::nil(),
            default_target_calories: None,
            macro_style: MacroStyle::default(),
        }
    }
}

/// Weight goal; the most recently created one is active
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub goal_type: String,
    pub target_weight_kg: f64,
    pub direction: GoalDirection,
    pub weekly_rate_kg: f64,
    pub duration_weeks: i32,
    pub start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Date the goal is planned to end
    pub fn target_date(&self) -> NaiveDate {
        self.start_date + Duration::weeks(i64::from(self.duration_weeks))
    }
}

/// Input for appending a goal
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub user_id: Uuid,
    pub target_weight_kg: f64,
    pub direction: GoalDirection,
    pub weekly_rate_kg: f64,
    pub duration_weeks: i32,
    pub start_date: NaiveDate,
}

// ============================================================================
// Raw daily log rows
// ============================================================================

/// One exercise session with its intensity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub met: f64,
    pub duration_min: i32,
}

/// One meal entry joined with its food item's per-serving nutrition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    pub quantity: f64,
    pub serving_size: Option<f64>,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// One water log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterEntry {
    pub intake_ml: i32,
}
