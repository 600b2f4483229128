//! Goals service
//!
//! Checks a proposed weight goal against the user's current state before
//! appending it. Goals are never updated in place; the newest one is active.

use crate::error::ApiError;
use crate::repositories::MetricsStore;
use chrono::NaiveDate;
use nutrition_tracker_shared::aggregation::session_window;
use nutrition_tracker_shared::metrics::{age_on, calculate_bmr, calculate_tdee};
use nutrition_tracker_shared::validation::{
    validate_duration_weeks, validate_weekly_rate, validate_weight,
};
use nutrition_tracker_shared::{
    plan_weight_goal, CreateGoalRequest, Goal, GoalDirection, GoalPlan, GoalProposal, NewGoal,
    Profile, WeightUnit,
};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Goal request after unit conversion and parsing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreateGoalInput {
    pub target_weight_kg: f64,
    pub direction: GoalDirection,
    pub weekly_rate_kg: f64,
    pub duration_weeks: i32,
    pub start_date: Option<NaiveDate>,
}

impl CreateGoalInput {
    /// Validate a request body and normalize it to kilograms
    pub fn from_request(req: &CreateGoalRequest) -> Result<Self, ApiError> {
        req.validate()?;

        let unit = match req.unit.as_deref() {
            Some(unit) => unit.parse::<WeightUnit>().map_err(ApiError::Validation)?,
            None => WeightUnit::Kg,
        };
        let target_weight_kg = unit.to_kg(req.target_weight);
        validate_weight(target_weight_kg).map_err(|e| {
            ApiError::Validation(format!("{} (target was {} {})", e, req.target_weight, unit))
        })?;
        validate_weekly_rate(req.weekly_rate).map_err(ApiError::Validation)?;
        validate_duration_weeks(req.duration_weeks).map_err(ApiError::Validation)?;

        let direction = req
            .goal_direction
            .parse::<GoalDirection>()
            .map_err(ApiError::Validation)?;

        Ok(Self {
            target_weight_kg,
            direction,
            weekly_rate_kg: req.weekly_rate,
            duration_weeks: req.duration_weeks,
            start_date: req.start_date,
        })
    }
}

/// Goal creation and lookup
pub struct GoalValidator;

impl GoalValidator {
    /// Check a goal against the safety limits and append it
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn validate_and_create<S: MetricsStore + ?Sized>(
        store: &S,
        user_id: Uuid,
        input: &CreateGoalInput,
        today: NaiveDate,
    ) -> Result<(Goal, GoalPlan), ApiError> {
        let profile = store.profile(user_id).await?.unwrap_or_else(|| Profile {
            user_id,
            ..Default::default()
        });
        let body = profile.require_complete()?;

        let current = store.latest_weight(user_id, today).await?.ok_or_else(|| {
            ApiError::Validation("Log your current weight before setting a goal".to_string())
        })?;

        let age = age_on(body.date_of_birth, today);
        let bmr = calculate_bmr(current.weight_kg, body.height_cm, age, body.gender);
        let (window_start, window_end) = session_window(today);
        let sessions = store
            .sessions_between(user_id, window_start, window_end)
            .await?;
        let tdee = calculate_tdee(bmr, sessions);

        let plan = plan_weight_goal(
            &GoalProposal {
                current_weight_kg: current.weight_kg,
                target_weight_kg: input.target_weight_kg,
                direction: input.direction,
                weekly_rate_kg: input.weekly_rate_kg,
            },
            bmr,
            tdee,
        )?;

        let goal = store
            .append_goal(NewGoal {
                user_id,
                target_weight_kg: input.target_weight_kg,
                direction: input.direction,
                weekly_rate_kg: input.weekly_rate_kg,
                duration_weeks: input.duration_weeks,
                start_date: input.start_date.unwrap_or(today),
            })
            .await?;

        info!(
            goal_id = %goal.id,
            direction = %goal.direction,
            target_calories = plan.target_calories,
            "Created weight goal"
        );

        Ok((goal, plan))
    }

    /// The most recently created goal
    pub async fn active_goal<S: MetricsStore + ?Sized>(
        store: &S,
        user_id: Uuid,
    ) -> Result<Goal, ApiError> {
        store
            .active_goal(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("No active goal".to_string()))
    }
}
