//! Handler for link shortening endpoint.

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "long_url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "short_url": "https://s.example.com/k9xZ2aB1",
///   "short_code": "k9xZ2aB1",
///   "long_url": "https://example.com/some/long/path",
///   "expires_in": "90 days"
/// }
/// ```
///
/// # Errors
///
/// - 400 if the body is not a JSON object, or `long_url` is missing or not http(s)
/// - 500 on a store failure or when no free code was found in 5 attempts
pub async fn shorten_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let payload = ShortenRequest::from_body(&body)?;
    payload.validate()?;

    let link = state
        .link_service
        .create_short_link(payload.long_url)
        .await?;
    let short_url = state.link_service.short_url(&link.short_code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse::new(link, short_url)),
    ))
}
