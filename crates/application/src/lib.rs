//! Application layer for the travel health service
//!
//! This crate orchestrates domain logic and coordinates between layers.
//!
//! ## Modules
//!
//! - `services` - Use cases and the repository ports they depend on
//! - `validation` - Request types and the validation framework

pub mod services;
pub mod validation;

pub use services::{
    ChildRepositoryPort, ChildServices, CityChildService, CityRepositoryPort, CityService,
    EmergencyRepositoryPort, EmergencyService, InsuranceRepositoryPort, InsuranceService,
    RatingRepositoryPort, RatingService, RepositorySet, Services,
};
pub use validation::{Validatable, ValidationResult, ValidationRules, ValidatorExt};

use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplicationError {
    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Malformed input, such as an id that is not a UUID
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing or out-of-range request fields
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Database or transaction failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Get HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            ApplicationError::NotFound(_) => 404,
            ApplicationError::InvalidInput(_) => 400,
            ApplicationError::ValidationFailed(_) => 400,
            ApplicationError::Storage(_) => 500,
            ApplicationError::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicationError::NotFound(_) => "NOT_FOUND",
            ApplicationError::InvalidInput(_) => "INVALID_INPUT",
            ApplicationError::ValidationFailed(_) => "VALIDATION_FAILED",
            ApplicationError::Storage(_) => "STORAGE_ERROR",
            ApplicationError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The detail text without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            ApplicationError::NotFound(msg)
            | ApplicationError::InvalidInput(msg)
            | ApplicationError::ValidationFailed(msg)
            | ApplicationError::Storage(msg)
            | ApplicationError::Internal(msg) => msg,
        }
    }

    /// Whether the message may be shown to clients as-is
    pub fn is_client_error(&self) -> bool {
        self.http_status() < 500
    }

    pub fn city_not_found() -> Self {
        ApplicationError::NotFound("City not found".to_string())
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
