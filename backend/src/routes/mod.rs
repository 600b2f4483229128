//! HTTP surface
//!
//! `/health*` probes at the root, everything else under `/api/v1`.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    http::{header, Method, Uri},
    routing::get,
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod goals;
mod health;
mod metrics;


pub use goals::goals_routes;
pub use health::health_routes;
pub use metrics::metrics_routes;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    // Outermost first: the request id exists before tracing starts
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(cors)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CompressionLayer::new());

    Router::new()
        .merge(health_routes())
        .nest("/api/v1", api_v1())
        .fallback(unknown_route)
        .layer(middleware)
        .with_state(state)
}

fn api_v1() -> Router<AppState> {
    let users = metrics_routes().merge(goals_routes());
    Router::new()
        .route("/", get(|| async { "Nutrition Tracker API v1" }))
        .nest("/users", users)
}

async fn unknown_route(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
