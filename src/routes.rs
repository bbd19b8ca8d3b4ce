//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`        - Welcome message
//! - `GET  /health`  - Health check: store, cache, snapshot queue
//! - `/api/*`        - REST API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/api`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, home_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = api::routes::api_routes().layer(rate_limit::layer());
    NormalizePathLayer::trim_trailing_slash().layer(router(state, api_router))
}

/// Same routes without per-IP rate limiting or path normalization.
///
/// The rate limiter keys on the peer socket address, which is only present
/// when the router is served with connect info. In-process servers that have
/// no peer address use this router instead.
pub fn unthrottled_router(state: AppState) -> Router {
    router(state, api::routes::api_routes())
}

fn router(state: AppState, api_router: Router<AppState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}
