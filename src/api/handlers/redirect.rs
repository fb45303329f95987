//! Handler for short URL redirect.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short_code}`
///
/// # Response
///
/// `301 Moved Permanently` with `Location` set to the stored long URL and an
/// empty body.
///
/// # Errors
///
/// - 400 if the code is empty after trimming or not valid UTF-8
/// - 404 if the code never existed or has expired
/// - 500 on a store failure, or if the stored URL cannot be sent as a header
pub async fn redirect_handler(
    short_code: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let Path(short_code) = short_code.map_err(|e| {
        tracing::debug!(error = %e, "Rejected short code path");
        AppError::bad_request("short_code is invalid")
    })?;

    let link = state.link_service.resolve(short_code.trim()).await?;

    let location = HeaderValue::try_from(link.long_url).map_err(|e| {
        tracing::error!(short_code = %link.short_code, "Stored URL is not a valid header value");
        AppError::internal("Stored URL cannot be redirected to", Some(e.to_string()))
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}

/// Answers `GET /`, where no short code was given.
pub async fn missing_code_handler() -> AppError {
    AppError::bad_request("short_code is required")
}

/// Answers a known path requested with the wrong method.
pub async fn method_not_allowed_handler() -> AppError {
    AppError::method_not_allowed("Method not allowed")
}

/// Fallback for routes that do not exist.
pub async fn fallback_handler() -> AppError {
    AppError::not_found("Route not found")
}
