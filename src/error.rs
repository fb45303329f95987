//! HTTP-facing error type.
//!
//! Every variant renders as a flat JSON body `{"error": "...", "detail": "..."}`
//! where `detail` is only present for server-side failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

use crate::domain::repositories::StoreError;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request body could not be parsed at all.
    #[error("{message}")]
    MalformedRequest { message: String },

    /// A field is missing or has an invalid value.
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    MethodNotAllowed { message: String },

    /// Every candidate short code collided with an existing record.
    #[error("{message}")]
    RetriesExhausted { message: String },

    /// Unexpected backend failure.
    #[error("{message}: {detail}")]
    Store { message: String, detail: String },

    #[error("{message}")]
    Internal {
        message: String,
        detail: Option<String>,
    },
}

impl AppError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::MethodNotAllowed {
            message: message.into(),
        }
    }

    pub fn retries_exhausted(message: impl Into<String>) -> Self {
        Self::RetriesExhausted {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>, detail: Option<String>) -> Self {
        Self::Internal {
            message: message.into(),
            detail,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MalformedRequest { .. } | AppError::Validation { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            AppError::RetriesExhausted { .. }
            | AppError::Store { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its JSON body.
    pub fn to_error_body(&self) -> ErrorBody {
        match self {
            AppError::MalformedRequest { message }
            | AppError::Validation { message }
            | AppError::NotFound { message }
            | AppError::MethodNotAllowed { message }
            | AppError::RetriesExhausted { message } => ErrorBody {
                error: message.clone(),
                detail: None,
            },
            AppError::Store { message, detail } => ErrorBody {
                error: message.clone(),
                detail: Some(detail.clone()),
            },
            AppError::Internal { message, detail } => ErrorBody {
                error: message.clone(),
                detail: detail.clone(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_error_body())).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store {
            message: "Database error".to_string(),
            detail: e.to_string(),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::bad_request(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::malformed("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::method_not_allowed("x").status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            AppError::retries_exhausted("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(StoreError::backend("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_errors_have_no_detail() {
        let body = serde_json::to_value(AppError::bad_request("long_url is required").to_error_body())
            .unwrap();

        assert_eq!(body["error"], "long_url is required");
        assert!(body.get("detail").is_none());
    }

    #[test]
    fn test_store_error_carries_detail() {
        let err = AppError::from(StoreError::backend("connection reset"));
        let body = serde_json::to_value(err.to_error_body()).unwrap();

        assert_eq!(body["error"], "Database error");
        assert_eq!(body["detail"], "connection reset");
    }
}
