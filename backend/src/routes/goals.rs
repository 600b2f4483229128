//! Goals API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::{CreateGoalInput, GoalValidator};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use nutrition_tracker_shared::{CreateGoalRequest, GoalResponse, GoalSummaryResponse};

pub fn goals_routes() -> Router<AppState> {
    Router::new().route("/goals", get(get_active_goal).post(create_goal))
}

/// POST /api/v1/users/goals - Append a new weight goal
async fn create_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<GoalSummaryResponse>), ApiError> {
    let input = CreateGoalInput::from_request(&req)?;
    let today = Utc::now().date_naive();

    let (goal, plan) =
        GoalValidator::validate_and_create(&state.store(), auth.user_id, &input, today).await?;

    Ok((StatusCode::CREATED, Json(GoalSummaryResponse::new(&goal, plan))))
}

/// GET /api/v1/users/goals - The active goal
async fn get_active_goal(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<GoalResponse>, ApiError> {
    let goal = GoalValidator::active_goal(&state.store(), auth.user_id).await?;
    Ok(Json(GoalResponse::from(&goal)))
}
