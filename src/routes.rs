//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: store and cache (public)
//! - `POST /auth/login`  - Token issue (public)
//! - `/users/*`          - User CRUD (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Panic recovery** - Panics become `500` JSON errors
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer JWT on user routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, panic, rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds every route with authentication, panic recovery and tracing.
///
/// Rate limiting is left out so the router can be driven without a socket
/// peer address, e.g. from tests.
pub fn api_router(state: AppState) -> Router {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .merge(protected)
        .merge(api::routes::public_routes())
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(panic::layer())
        .layer(tracing::layer())
}

/// Constructs the application router served by the binary.
///
/// # Errors
///
/// Returns an error if the rate limit configuration is invalid.
pub fn app_router(state: AppState, config: &Config) -> anyhow::Result<NormalizePath<Router>> {
    let router = api_router(state).layer(rate_limit::layer(
        config.rate_limit_per_second,
        config.rate_limit_burst,
        config.behind_proxy,
    )?);

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
