//! Validation Framework
//!
//! Every mutating operation takes one request type. Request fields are
//! optional at the serde level so a missing field is reported as a
//! validation failure rather than a parse error, and each request is turned
//! into a domain draft only after [`Validatable::validate_all`] passes.

mod child;
mod city;
mod emergency;
mod insurance;
mod rating;

pub use child::*;
pub use city::*;
pub use emergency::*;
pub use insurance::*;
pub use rating::*;

use crate::{ApplicationError, ApplicationResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use travel_health_domain::{is_valid_rating, MAX_RATING, MIN_RATING};
use validator::Validate;

/// Validation result containing all errors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether validation passed
    pub valid: bool,
    /// Field-level errors, keyed by field path such as `hospitals[1].name`
    pub field_errors: BTreeMap<String, Vec<String>>,
    /// Object-level errors
    pub object_errors: Vec<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            valid: true,
            field_errors: BTreeMap::new(),
            object_errors: Vec::new(),
        }
    }

    /// Create a failed validation result with a single error
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            field_errors: BTreeMap::new(),
            object_errors: vec![message.into()],
        }
    }

    /// Add a field-level error
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.field_errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Add an object-level error
    pub fn add_object_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.object_errors.push(message.into());
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }

        for (field, errors) in other.field_errors {
            self.field_errors.entry(field).or_default().extend(errors);
        }

        self.object_errors.extend(other.object_errors);
    }

    /// Merge another result with its field paths nested under `prefix`.
    pub fn merge_nested(&mut self, prefix: &str, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }

        for (field, errors) in other.field_errors {
            self.field_errors
                .entry(format!("{}.{}", prefix, field))
                .or_default()
                .extend(errors);
        }

        for message in other.object_errors {
            self.field_errors
                .entry(prefix.to_string())
                .or_default()
                .push(message);
        }
    }

    /// Convert to ApplicationError if invalid
    pub fn to_error(&self) -> Option<ApplicationError> {
        if self.valid {
            return None;
        }

        let mut messages = Vec::new();

        for (field, errors) in &self.field_errors {
            for error in errors {
                messages.push(format!("{}: {}", field, error));
            }
        }

        messages.extend(self.object_errors.clone());

        Some(ApplicationError::ValidationFailed(messages.join("; ")))
    }

    /// Ensure validation passed, returning error if not
    pub fn ensure_valid(&self) -> Result<(), ApplicationError> {
        match self.to_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Trait for validatable types
pub trait Validatable {
    /// Validate the type and return a result
    fn validate_all(&self) -> ValidationResult;
}

/// Extension to convert validator errors to our format
pub trait ValidatorExt {
    fn to_validation_result(&self) -> ValidationResult;
}

impl<T: Validate> ValidatorExt for T {
    fn to_validation_result(&self) -> ValidationResult {
        match self.validate() {
            Ok(_) => ValidationResult::success(),
            Err(errors) => {
                let mut result = ValidationResult::success();

                for (field, field_errors) in errors.field_errors() {
                    for error in field_errors {
                        let message = error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| error.code.to_string());
                        result.add_field_error(field.to_string(), message);
                    }
                }

                result
            }
        }
    }
}

/// Common validation rules
pub struct ValidationRules;

impl ValidationRules {
    /// Validate a rating lies in the accepted range
    pub fn validate_rating(value: f64, field: &str) -> ValidationResult {
        let mut result = ValidationResult::success();

        if !is_valid_rating(value) {
            result.add_field_error(
                field,
                format!("Rating must be between {} and {}", MIN_RATING, MAX_RATING),
            );
        }

        result
    }

    /// Validate an http(s) URL
    pub fn validate_url(url: &str, field: &str) -> ValidationResult {
        let mut result = ValidationResult::success();

        if let Err(message) = travel_health_common::validate_http_url(url) {
            result.add_field_error(field, message);
        }

        result
    }

    /// Validate a list size
    pub fn validate_list_size<T>(
        list: &[T],
        field: &str,
        min: Option<usize>,
        max: Option<usize>,
    ) -> ValidationResult {
        let mut result = ValidationResult::success();

        if let Some(min_size) = min {
            if list.len() < min_size {
                result.add_field_error(field, format!("Must have at least {} items", min_size));
            }
        }

        if let Some(max_size) = max {
            if list.len() > max_size {
                result.add_field_error(field, format!("Must have {} items or less", max_size));
            }
        }

        result
    }

    /// Validate a UUID-backed identifier
    pub fn validate_id<I: FromStr>(value: &str, field: &str) -> ValidationResult {
        let mut result = ValidationResult::success();

        if value.parse::<I>().is_err() {
            result.add_field_error(field, "Invalid UUID format");
        }

        result
    }
}

/// Validate every element of a list and nest the errors under `field[i]`.
pub fn validate_each<T: Validatable>(items: &[T], field: &str) -> ValidationResult {
    let mut result = ValidationResult::success();

    for (i, item) in items.iter().enumerate() {
        result.merge_nested(&format!("{}[{}]", field, i), item.validate_all());
    }

    result
}

/// Take a field that validation has already checked for presence.
pub fn required<T>(value: Option<T>, field: &str) -> ApplicationResult<T> {
    value.ok_or_else(|| ApplicationError::ValidationFailed(format!("{}: is required", field)))
}

/// Parse a path or body identifier, rejecting anything that is not a UUID.
pub fn parse_id<I: FromStr>(value: &str, what: &str) -> ApplicationResult<I> {
    value
        .parse::<I>()
        .map_err(|_| ApplicationError::InvalidInput(format!("Invalid {} ID: {}", what, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use travel_health_domain::CityId;

    #[test]
    fn test_validation_result_success() {
        let result = ValidationResult::success();
        assert!(result.valid);
        assert!(result.field_errors.is_empty());
        assert!(result.object_errors.is_empty());
        assert!(result.to_error().is_none());
    }

    #[test]
    fn test_validation_result_error() {
        let result = ValidationResult::error("Test error");
        assert!(!result.valid);
        assert!(result.object_errors.contains(&"Test error".to_string()));
        assert!(matches!(
            result.to_error(),
            Some(ApplicationError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_validation_result_merge() {
        let mut result1 = ValidationResult::success();
        result1.add_field_error("field1", "Error 1");

        let mut result2 = ValidationResult::success();
        result2.add_field_error("field2", "Error 2");

        result1.merge(result2);
        assert!(!result1.valid);
        assert!(result1.field_errors.contains_key("field1"));
        assert!(result1.field_errors.contains_key("field2"));
    }

    #[test]
    fn test_merge_nested_prefixes_paths() {
        let mut inner = ValidationResult::success();
        inner.add_field_error("name", "is required");
        inner.add_object_error("bad element");

        let mut outer = ValidationResult::success();
        outer.merge_nested("hospitals[2]", inner);

        assert!(!outer.valid);
        assert!(outer.field_errors.contains_key("hospitals[2].name"));
        assert!(outer.field_errors.contains_key("hospitals[2]"));
    }

    #[test]
    fn test_validate_rating() {
        assert!(ValidationRules::validate_rating(0.0, "rating").valid);
        assert!(ValidationRules::validate_rating(5.0, "rating").valid);
        assert!(!ValidationRules::validate_rating(5.5, "rating").valid);
        assert!(!ValidationRules::validate_rating(-1.0, "rating").valid);
        assert!(!ValidationRules::validate_rating(f64::NAN, "rating").valid);
    }

    #[test]
    fn test_validate_id() {
        let id = CityId::new().to_string();
        assert!(ValidationRules::validate_id::<CityId>(&id, "cityId").valid);
        assert!(!ValidationRules::validate_id::<CityId>("c1", "cityId").valid);
    }

    #[test]
    fn test_parse_id() {
        assert!(parse_id::<CityId>("nope", "City").is_err());
        let id = CityId::new();
        assert_eq!(parse_id::<CityId>(&id.to_string(), "City").unwrap(), id);
    }

    #[test]
    fn test_required() {
        assert_eq!(required(Some(3), "x").unwrap(), 3);
        assert!(required::<i32>(None, "x").is_err());
    }
}
