//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`       - Create a short link
//! - `GET  /{short_code}`  - Short link redirect
//! - `GET  /health`        - Store health check
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - `Access-Control-Allow-Origin: *` on every response
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{fallback_handler, method_not_allowed_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    api::routes::public_routes()
        .fallback(fallback_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .with_state(state)
        .layer(cors::layer())
        .layer(cors::allow_any_origin())
        .layer(tracing::layer())
}

/// [`router`] wrapped so that `/abc/` is routed like `/abc`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
