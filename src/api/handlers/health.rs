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
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "postgres reachable" },
///     "cache": { "status": "ok", "message": "redis reachable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let response = check_health(&state).await;

    if response.is_healthy() {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Probes the store and the cache.
pub async fn check_health(state: &AppState) -> HealthResponse {
    let database = match state.store.ping().await {
        Ok(()) => CheckStatus::ok(format!("{} reachable", state.store.kind())),
        Err(e) => CheckStatus::error(format!("{} error: {}", state.store.kind(), e)),
    };

    let cache = if state.cache.health_check().await {
        CheckStatus::ok(format!("{} reachable", state.cache.backend()))
    } else {
        CheckStatus::error(format!("{} unreachable", state.cache.backend()))
    };

    let checks = HealthChecks { database, cache };
    let healthy = checks.database.is_ok() && checks.cache.is_ok();

    HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    }
}
