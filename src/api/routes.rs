//! API route configuration.
//!
//! No endpoint requires authentication.

use crate::api::handlers::{
    health_handler, missing_code_handler, redirect_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public routes.
///
/// # Endpoints
///
/// - `POST /shorten`        - Create a short link
/// - `GET  /health`         - Store health check
/// - `GET  /`               - Rejected: missing short code
/// - `GET  /{short_code}`   - Redirect to the long URL
///
/// Static segments take priority over `/{short_code}`; generated codes are
/// always 8 characters so `health` and `shorten` never shadow a link.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/", get(missing_code_handler))
        .route("/{short_code}", get(redirect_handler))
}
