//! Long URL validation used by the shorten request DTO.

use std::borrow::Cow;
use validator::ValidationError;

const ALLOWED_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Validates a trimmed long URL.
///
/// # Rules
///
/// - Must not be empty
/// - Must start with `http://` or `https://`
/// - Must not contain ASCII control characters other than tab, since the URL
///   is sent back verbatim in a `Location` header
///
/// # Errors
///
/// Returns a [`ValidationError`] whose message is safe to show to API callers.
pub fn validate_long_url(long_url: &str) -> Result<(), ValidationError> {
    if long_url.is_empty() {
        return Err(
            ValidationError::new("required").with_message(Cow::Borrowed("long_url is required"))
        );
    }

    if !ALLOWED_PREFIXES.iter().any(|p| long_url.starts_with(p)) {
        return Err(ValidationError::new("scheme").with_message(Cow::Borrowed(
            "long_url must start with http:// or https://",
        )));
    }

    if long_url.bytes().any(is_forbidden_control) {
        return Err(ValidationError::new("control").with_message(Cow::Borrowed(
            "long_url must not contain control characters",
        )));
    }

    Ok(())
}

fn is_forbidden_control(byte: u8) -> bool {
    (byte < 0x20 && byte != b'\t') || byte == 0x7f
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_long_url("http://example.com").is_ok());
        assert!(validate_long_url("https://example.com/page?q=1").is_ok());
    }

    #[test]
    fn test_rejects_empty() {
        let err = validate_long_url("").unwrap_err();
        assert_eq!(err.code, "required");
    }

    #[test]
    fn test_rejects_other_schemes() {
        for url in ["ftp://x.com", "javascript:alert(1)", "example.com", "HTTPS://x.com"] {
            let err = validate_long_url(url).unwrap_err();
            assert_eq!(err.code, "scheme", "{url}");
        }
    }

    #[test]
    fn test_rejects_control_characters() {
        for url in [
            "https://example.com/a\nb",
            "https://example.com/a\rb",
            "https://example.com/\0",
            "https://example.com/\x7f",
        ] {
            let err = validate_long_url(url).unwrap_err();
            assert_eq!(err.code, "control", "{url:?}");
        }
    }

    #[test]
    fn test_allows_tab() {
        assert!(validate_long_url("https://example.com/a\tb").is_ok());
    }
}
