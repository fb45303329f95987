//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::domain::entities::ShortLink;
use crate::error::AppError;
use crate::utils::url_validator::validate_long_url;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL (must start with `http://` or `https://`).
    #[serde(default)]
    #[validate(custom(function = "validate_long_url"))]
    pub long_url: String,
}

impl ShortenRequest {
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
        }
    }

    /// Parses a raw request body.
    ///
    /// An empty body is treated as `{}`. Surrounding whitespace of `long_url`
    /// is trimmed; validation is left to [`Validate::validate`].
    ///
    /// # Errors
    ///
    /// - [`AppError::MalformedRequest`] if the body is not a JSON object
    /// - [`AppError::Validation`] if `long_url` is present but not a string
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Default::default())
        } else {
            serde_json::from_slice(body)
                .map_err(|_| AppError::malformed("Request body must be valid JSON"))?
        };

        if !value.is_object() {
            return Err(AppError::malformed("Request body must be a JSON object"));
        }

        let mut request: ShortenRequest = serde_json::from_value(value)
            .map_err(|_| AppError::bad_request("long_url must be a string"))?;
        request.long_url = request.long_url.trim().to_string();

        Ok(request)
    }
}

/// Response for a created short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub short_code: String,
    pub long_url: String,
    pub expires_in: String,
}

impl ShortenResponse {
    pub fn new(link: ShortLink, short_url: String) -> Self {
        Self {
            short_url,
            short_code: link.short_code,
            long_url: link.long_url,
            expires_in: ShortLink::expires_in(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body_valid() {
        let request = ShortenRequest::from_body(br#"{"long_url": "  https://example.com  "}"#)
            .unwrap();
        assert_eq!(request.long_url, "https://example.com");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_from_body_empty_is_missing_field() {
        let request = ShortenRequest::from_body(b"").unwrap();
        assert_eq!(request.long_url, "");

        let err = AppError::from(request.validate().unwrap_err());
        assert_eq!(err.to_string(), "long_url is required");
    }

    #[test]
    fn test_from_body_not_json() {
        let err = ShortenRequest::from_body(b"not json").unwrap_err();
        assert!(matches!(err, AppError::MalformedRequest { .. }));
    }

    #[test]
    fn test_from_body_not_an_object() {
        let err = ShortenRequest::from_body(br#"["https://example.com"]"#).unwrap_err();
        assert!(matches!(err, AppError::MalformedRequest { .. }));
    }

    #[test]
    fn test_from_body_non_string_url() {
        let err = ShortenRequest::from_body(br#"{"long_url": 42}"#).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_validate_rejects_ftp() {
        let err = AppError::from(ShortenRequest::new("ftp://x.com").validate().unwrap_err());
        assert_eq!(
            err.to_string(),
            "long_url must start with http:// or https://"
        );
    }
}
