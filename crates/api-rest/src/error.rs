//! HTTP error handling and conversion.
//!
//! Application errors map onto status codes. Server-side failures are
//! logged in full and reported to clients with a generic message.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use travel_health_application::ApplicationError;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// API-specific error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Application layer error
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Body that is not valid JSON for the expected shape
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Application(err) => StatusCode::from_u16(err.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get error code for API response
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Application(err) => err.error_code(),
            Self::BadRequest(_) => "BAD_REQUEST",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Application(err) if err.is_client_error() => err.message().to_string(),
            Self::Application(err) => {
                error!(error = %err, code = err.error_code(), "Request failed");
                INTERNAL_MESSAGE.to_string()
            }
            Self::BadRequest(message) => message.clone(),
        }
    }
}

/// Standardized error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code
    pub error: String,

    /// Human-readable message
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.error_code().to_string(),
            message: self.client_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = ApiError::from(ApplicationError::city_not_found());
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let invalid = ApiError::from(ApplicationError::ValidationFailed("rating: out of range".into()));
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.error_code(), "VALIDATION_FAILED");
    }

    #[test]
    fn test_storage_details_are_hidden() {
        let err = ApiError::from(ApplicationError::Storage("connection refused".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), INTERNAL_MESSAGE);
    }

    #[test]
    fn test_client_messages_are_kept() {
        let err = ApiError::from(ApplicationError::city_not_found());
        assert_eq!(err.client_message(), "City not found");
    }
}
