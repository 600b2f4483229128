//! Daily metrics service
//!
//! `MetricsEngine` turns a profile, a current weight, the active goal and the
//! day's logs into a `MetricsSnapshot`. Every figure is recomputed per call;
//! the only write is the best-effort `default_target_calories` cache.

use crate::error::ApiError;
use crate::repositories::MetricsStore;
use chrono::NaiveDate;
use nutrition_tracker_shared::aggregation::{
    calories_burned, calories_consumed, macros_consumed, session_window, water_intake_ml,
};
use nutrition_tracker_shared::metrics::{
    age_on, calculate_bmi, calculate_bmr, calculate_macros, calculate_target_calories,
    calculate_tdee,
};
use nutrition_tracker_shared::{
    Goal, GoalDirection, MacroStyle, MetricsSnapshot, Profile, UserSettings, WeightSample,
};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Everything the engine needs besides the profile and the logs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsInput {
    pub current_weight_kg: f64,
    pub goal_direction: GoalDirection,
    pub weekly_rate_kg: f64,
    pub macro_style: MacroStyle,
}

impl MetricsInput {
    /// Maintain at 0 kg/week with the balanced split
    pub fn new(current_weight_kg: f64) -> Self {
        Self {
            current_weight_kg,
            goal_direction: GoalDirection::default(),
            weekly_rate_kg: 0.0,
            macro_style: MacroStyle::default(),
        }
    }

    /// Resolve the input from stored state
    ///
    /// No weight sample yields weight 0, which the engine rejects. No goal
    /// keeps the maintain defaults.
    pub fn from_sources(
        weight: Option<&WeightSample>,
        goal: Option<&Goal>,
        settings: &UserSettings,
    ) -> Self {
        let mut input = Self::new(weight.map_or(0.0, |w| w.weight_kg));
        if let Some(goal) = goal {
            input.goal_direction = goal.direction;
            input.weekly_rate_kg = goal.weekly_rate_kg;
        }
        input.macro_style = settings.macro_style;
        input
    }
}

/// Daily metrics computation
pub struct MetricsEngine;

impl MetricsEngine {
    /// Compute the snapshot for `date`
    #[instrument(skip_all, fields(user_id = %user_id, date = %date))]
    pub async fn compute<S: MetricsStore + ?Sized>(
        store: &S,
        user_id: Uuid,
        profile: &Profile,
        input: &MetricsInput,
        date: NaiveDate,
    ) -> Result<MetricsSnapshot, ApiError> {
        let body = profile.require_complete()?;
        let weight_kg = input.current_weight_kg;
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(ApiError::Validation("invalid weight".to_string()));
        }

        let age = age_on(body.date_of_birth, date);
        let bmi = calculate_bmi(weight_kg, body.height_cm);
        let bmr = calculate_bmr(weight_kg, body.height_cm, age, body.gender);

        let (window_start, window_end) = session_window(date);
        let sessions = store
            .sessions_between(user_id, window_start, window_end)
            .await?;
        let tdee = calculate_tdee(bmr, sessions);

        let target_calories =
            calculate_target_calories(tdee, bmr, input.weekly_rate_kg, input.goal_direction);

        let meals = store.meal_entries(user_id, date).await?;
        let consumed = calories_consumed(&meals);
        let exercise = store.exercise_entries(user_id, date).await?;
        let (burned, _) = calories_burned(&exercise, weight_kg);
        let remaining = f64::from(target_calories) - consumed + burned;

        let water = store.water_entries(user_id, date).await?;

        let snapshot = MetricsSnapshot {
            bmi,
            bmr,
            tdee,
            target_calories,
            macros: calculate_macros(target_calories, input.goal_direction, input.macro_style),
            macros_consumed: macros_consumed(&meals),
            remaining_calories: remaining.round() as i32,
            calories_burned: burned.round() as i32,
            calories_consumed: consumed.round() as i32,
            water_intake_ml: water_intake_ml(&water),
        };

        debug!(
            age,
            sessions,
            bmr,
            tdee,
            target_calories,
            direction = %input.goal_direction,
            "Computed daily metrics"
        );

        // Cache only; a failed write must not fail the request
        if let Err(e) = store
            .save_default_target_calories(user_id, target_calories)
            .await
        {
            warn!(error = %e, "Failed to store default target calories");
        }

        Ok(snapshot)
    }

    /// Load profile, current weight, active goal and settings, then compute
    pub async fn daily_metrics<S: MetricsStore + ?Sized>(
        store: &S,
        user_id: Uuid,
        date: NaiveDate,
        macro_style: Option<MacroStyle>,
    ) -> Result<MetricsSnapshot, ApiError> {
        let profile = store.profile(user_id).await?.unwrap_or_else(|| Profile {
            user_id,
            ..Default::default()
        });
        let weight = store.latest_weight(user_id, date).await?;
        let goal = store.active_goal(user_id).await?;
        let settings = store.settings(user_id).await?;

        let mut input = MetricsInput::from_sources(weight.as_ref(), goal.as_ref(), &settings);
        if let Some(style) = macro_style {
            input.macro_style = style;
        }

        Self::compute(store, user_id, &profile, &input, date).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryStore;
    use chrono::Utc;

    fn goal(direction: GoalDirection, weekly_rate_kg: f64) -> Goal {
        Goal {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            goal_type: "weight".to_string(),
            target_weight_kg: 70.0,
            direction,
            weekly_rate_kg,
            duration_weeks: 12,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_input_defaults_without_goal() {
        let sample = WeightSample {
            weight_kg: 80.0,
            logged_at: Utc::now(),
        };
        let input = MetricsInput::from_sources(Some(&sample), None, &UserSettings::default());
        assert_eq!(input, MetricsInput::new(80.0));
        assert_eq!(input.goal_direction, GoalDirection::Maintain);
        assert_eq!(input.weekly_rate_kg, 0.0);
    }

    #[test]
    fn test_input_takes_goal_and_style() {
        let settings = UserSettings {
            macro_style: MacroStyle::LowCarb,
            ..Default::default()
        };
        let active = goal(GoalDirection::Gain, 0.25);
        let input = MetricsInput::from_sources(None, Some(&active), &settings);
        assert_eq!(input.current_weight_kg, 0.0);
        assert_eq!(input.goal_direction, GoalDirection::Gain);
        assert_eq!(input.weekly_rate_kg, 0.25);
        assert_eq!(input.macro_style, MacroStyle::LowCarb);
    }

    #[tokio::test]
    async fn test_unusable_weight_rejected() {
        let store = InMemoryStore::new();
        let user_id = Uuid::new_v4();
        let profile = Profile {
            user_id,
            height_cm: Some(170.0),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 6, 1),
            gender: None,
        };
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

        for weight in [0.0, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = MetricsEngine::compute(&store, user_id, &profile, &MetricsInput::new(weight), date)
                .await
                .unwrap_err();
            assert!(matches!(err, ApiError::Validation(msg) if msg == "invalid weight"));
        }
    }

    #[tokio::test]
    async fn test_extreme_weight_does_not_overflow() {
        let store = InMemoryStore::new();
        let user_id = Uuid::new_v4();
        let profile = Profile {
            user_id,
            height_cm: Some(170.0),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 6, 1),
            gender: None,
        };
        let input = MetricsInput {
            goal_direction: GoalDirection::Gain,
            weekly_rate_kg: 1.0,
            ..MetricsInput::new(1e9)
        };
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

        let snapshot = MetricsEngine::compute(&store, user_id, &profile, &input, date)
            .await
            .unwrap();
        assert_eq!(snapshot.bmr, i32::MAX);
        assert_eq!(snapshot.target_calories, i32::MAX);
        assert!(snapshot.bmi.is_finite());
    }
}
