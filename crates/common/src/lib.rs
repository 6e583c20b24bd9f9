//! Common utilities shared by the travel health services.
//!
//! This crate provides:
//! - Configuration management
//! - Tracing setup
//! - Small validation helpers used by request types

pub mod config;
pub mod telemetry;
pub mod validation;

pub use config::{AppConfig, DatabaseConfig, ServerConfig, TelemetryConfig};
pub use telemetry::init_tracing;
pub use validation::{is_present, validate_http_url};

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;
