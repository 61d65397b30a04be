//! Handlers for liveness and health endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Reports whether the storage backend is reachable.
///
/// # Endpoint
///
/// `GET /ping`
///
/// # Response Codes
///
/// - **200 OK**: backend healthy
/// - **500 Internal Server Error**: backend unreachable
pub async fn ping_handler(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.links.health_check().await {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "storage unavailable")
    }
}

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok", "message": "postgres backend reachable" },
///     "delete_queue": { "status": "ok", "message": "Capacity: 1024" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage = check_storage(&state).await;
    let delete_queue = check_delete_queue(&state);

    let all_healthy = storage.is_ok() && delete_queue.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            storage,
            delete_queue,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_storage(state: &AppState) -> CheckStatus {
    let backend = state.links.backend_name();

    if state.links.health_check().await {
        CheckStatus::ok(format!("{backend} backend reachable"))
    } else {
        CheckStatus::error(format!("{backend} backend unreachable"))
    }
}

/// Checks if the delete worker is still consuming events.
fn check_delete_queue(state: &AppState) -> CheckStatus {
    if state.links.delete_queue_open() {
        CheckStatus::ok(format!(
            "Capacity: {}",
            state.links.delete_queue_capacity()
        ))
    } else {
        CheckStatus::error("Delete queue is closed")
    }
}
