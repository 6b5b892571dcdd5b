use axum::{extract::State, http::StatusCode};
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

use super::{ApiResponse, AppState, HealthPayload};

#[derive(Debug, serde::Serialize)]
pub struct HelloPayload {
    pub message: &'static str,
}

/// GET /
pub async fn hello() -> ApiResponse<HelloPayload> {
    ApiResponse::success(
        "Hello World",
        HelloPayload {
            message: "Hello World",
        },
    )
}

/// GET /health
///
/// Pings the database (bounded by the store's query timeout) and reports
/// 503 when it does not answer.
pub async fn health(State(state): State<Arc<AppState>>) -> ApiResponse<HealthPayload> {
    let started = Instant::now();
    let uptime_secs = state.start_time.elapsed().as_secs();

    match state.store().ping().await {
        Ok(()) => {
            let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            ApiResponse::success(
                "It's healthy",
                HealthPayload {
                    status: "up",
                    latency_ms: Some(latency_ms),
                    uptime_secs,
                },
            )
        }
        Err(e) => {
            warn!(error = %e, "Health check failed");
            ApiResponse::with_status(
                StatusCode::SERVICE_UNAVAILABLE,
                "Database is unreachable",
                HealthPayload {
                    status: "down",
                    latency_ms: None,
                    uptime_secs,
                },
            )
        }
    }
}
