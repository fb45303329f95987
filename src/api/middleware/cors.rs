//! Cross-origin headers.
//!
//! Every response carries `Access-Control-Allow-Origin: *`, whether or not the
//! request sent an `Origin` header. Preflight requests for `GET` and `POST`
//! with a JSON body are answered by [`layer`].

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

/// Answers CORS preflight requests from any origin.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Adds `Access-Control-Allow-Origin: *` to responses that lack it.
pub fn allow_any_origin() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    )
}
