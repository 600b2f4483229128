//! Liveness and readiness probes

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(liveness))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
}

#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseProbe>,
}

#[derive(Debug, Serialize)]
pub struct DatabaseProbe {
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResponse {
    fn new(status: &'static str, database: Option<DatabaseProbe>) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
        }
    }
}

/// GET /health, /health/live
async fn liveness() -> Json<ProbeResponse> {
    Json(ProbeResponse::new("alive", None))
}

/// GET /health/ready - 503 until the database answers
async fn readiness(
    State(state): State<AppState>,
) -> Result<Json<ProbeResponse>, (StatusCode, Json<ProbeResponse>)> {
    let probe = match db::ping(state.db()).await {
        Ok(latency) => DatabaseProbe {
            reachable: true,
            latency_ms: Some(u64::try_from(latency.as_millis()).unwrap_or(u64::MAX)),
            schema_version: db::schema_version(state.db()).await.ok().flatten(),
            error: None,
        },
        Err(e) => DatabaseProbe {
            reachable: false,
            latency_ms: None,
            schema_version: None,
            error: Some(e.to_string()),
        },
    };

    if probe.reachable {
        Ok(Json(ProbeResponse::new("ready", Some(probe))))
    } else {
        Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ProbeResponse::new("not_ready", Some(probe))),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness_needs_no_database() {
        let Json(body) = liveness().await;
        assert_eq!(body.status, "alive");
        assert!(body.database.is_none());
    }

    #[test]
    fn test_unreachable_probe_serializes_error_only() {
        let body = serde_json::to_value(ProbeResponse::new(
            "not_ready",
            Some(DatabaseProbe {
                reachable: false,
                latency_ms: None,
                schema_version: None,
                error: Some("connection refused".to_string()),
            }),
        ))
        .unwrap();
        assert_eq!(body["database"]["reachable"], false);
        assert!(body["database"].get("latency_ms").is_none());
        assert_eq!(body["database"]["error"], "connection refused");
    }
}
