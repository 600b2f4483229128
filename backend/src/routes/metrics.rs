//! Daily metrics API route

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::MetricsEngine;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use nutrition_tracker_shared::validation::parse_date;
use nutrition_tracker_shared::{MacroStyle, MetricsQuery, MetricsSnapshot};

pub fn metrics_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(get_metrics))
}

/// GET /api/v1/users/metrics?date=YYYY-MM-DD&macro_style=...
async fn get_metrics(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MetricsQuery>,
) -> Result<Json<MetricsSnapshot>, ApiError> {
    let date = match query.date.as_deref() {
        Some(raw) => parse_date(raw).map_err(ApiError::BadRequest)?,
        None => Utc::now().date_naive(),
    };
    let macro_style = query
        .macro_style
        .as_deref()
        .map(str::parse::<MacroStyle>)
        .transpose()
        .map_err(ApiError::Validation)?;

    let snapshot =
        MetricsEngine::daily_metrics(&state.store(), auth.user_id, date, macro_style).await?;
    Ok(Json(snapshot))
}
