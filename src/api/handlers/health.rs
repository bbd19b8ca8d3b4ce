//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

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
/// # Components Checked
///
/// 1. **Database**: Counts cars through the entity store
/// 2. **Snapshot Queue**: Checks the availability worker channel is open
/// 3. **Cache**: Backend ping (always ok when caching is disabled)
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "booking_rules": "strict",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 12 cars" },
///     "snapshot_queue": { "status": "ok", "message": "Capacity: 1024" },
///     "cache": { "status": "ok", "message": "Cache reachable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;

    let queue_check = check_snapshot_queue(&state);

    let cache_check = check_cache(&state).await;

    let all_healthy = db_check.is_ok() && queue_check.is_ok() && cache_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        booking_rules: state.reservation_service.rules().to_string(),
        checks: HealthChecks {
            database: db_check,
            snapshot_queue: queue_check,
            cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.car_service.count().await {
        Ok(count) => CheckStatus::ok(format!("Connected, {count} cars")),
        Err(e) => CheckStatus::error(format!("Database error: {e}")),
    }
}

fn check_snapshot_queue(state: &AppState) -> CheckStatus {
    if state.snapshot_sender.is_closed() {
        CheckStatus::error("Snapshot queue is closed")
    } else {
        CheckStatus::ok(format!("Capacity: {}", state.snapshot_sender.capacity()))
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    if state.cache.health_check().await {
        CheckStatus::ok("Cache reachable")
    } else {
        CheckStatus::error("Cache connection failed")
    }
}
