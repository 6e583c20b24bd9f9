//! City request validation

use super::{required, Validatable, ValidationResult, ValidationRules, ValidatorExt};
use crate::ApplicationResult;
use serde::{Deserialize, Serialize};
use travel_health_domain::CityDraft;
use validator::Validate;

/// Create a city together with its first general rating
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCityRequest {
    #[serde(alias = "cityName")]
    #[validate(
        required(message = "is required"),
        length(min = 1, max = 200, message = "must be between 1 and 200 characters")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "is required"),
        length(min = 1, max = 200, message = "must be between 1 and 200 characters")
    )]
    pub country: Option<String>,

    #[validate(
        required(message = "is required"),
        length(min = 1, message = "must not be empty")
    )]
    pub overview: Option<String>,

    #[validate(required(message = "is required"))]
    pub general_rating: Option<f64>,
}

impl Validatable for CreateCityRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = self.to_validation_result();
        if let Some(rating) = self.general_rating {
            result.merge(ValidationRules::validate_rating(rating, "general_rating"));
        }
        result
    }
}

impl CreateCityRequest {
    pub fn into_draft(self) -> ApplicationResult<(CityDraft, f64)> {
        let draft = CityDraft {
            name: required(self.name, "name")?,
            country: required(self.country, "country")?,
            overview: required(self.overview, "overview")?,
        };
        Ok((draft, required(self.general_rating, "generalRating")?))
    }
}

/// Store an already-uploaded image URL for a city
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateImageRequest {
    #[serde(alias = "cityImageUrl")]
    #[validate(required(message = "is required"))]
    pub image_url: Option<String>,
}

impl Validatable for UpdateImageRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = self.to_validation_result();
        if let Some(url) = &self.image_url {
            result.merge(ValidationRules::validate_url(url, "imageUrl"));
        }
        result
    }
}

impl UpdateImageRequest {
    pub fn into_url(self) -> ApplicationResult<String> {
        required(self.image_url, "imageUrl")
    }
}

/// Set or replace a city's description
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionRequest {
    #[validate(
        required(message = "is required"),
        length(min = 1, message = "must not be empty")
    )]
    pub description: Option<String>,
}

impl Validatable for DescriptionRequest {
    fn validate_all(&self) -> ValidationResult {
        self.to_validation_result()
    }
}

impl DescriptionRequest {
    pub fn into_description(self) -> ApplicationResult<String> {
        required(self.description, "description")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_city() -> CreateCityRequest {
        CreateCityRequest {
            name: Some("Kyoto".to_string()),
            country: Some("Japan".to_string()),
            overview: Some("Temples and gardens".to_string()),
            general_rating: Some(4.5),
        }
    }

    #[test]
    fn test_valid_city_request() {
        assert!(valid_city().validate_all().valid);
    }

    #[test]
    fn test_city_requires_every_field() {
        let result = CreateCityRequest::default().validate_all();
        assert!(!result.valid);
        assert_eq!(result.field_errors.len(), 4);
    }

    #[test]
    fn test_city_rating_range() {
        let mut request = valid_city();
        request.general_rating = Some(7.0);
        let result = request.validate_all();
        assert!(!result.valid);
        assert_eq!(result.field_errors.len(), 1);
        assert!(result.field_errors.contains_key("general_rating"));

        request.general_rating = Some(f64::NAN);
        assert!(!request.validate_all().valid);
    }

    #[test]
    fn test_city_accepts_legacy_field_name() {
        let request: CreateCityRequest = serde_json::from_str(
            r#"{"cityName":"Oslo","country":"Norway","overview":"Fjords","generalRating":4}"#,
        )
        .unwrap();
        assert_eq!(request.name.as_deref(), Some("Oslo"));
        assert!(request.validate_all().valid);
    }

    #[test]
    fn test_image_url_must_be_http() {
        let request = UpdateImageRequest {
            image_url: Some("file:///etc/passwd".to_string()),
        };
        assert!(!request.validate_all().valid);

        let request = UpdateImageRequest {
            image_url: Some("https://i.imgur.com/x.png".to_string()),
        };
        assert!(request.validate_all().valid);
    }

    #[test]
    fn test_description_rejects_empty() {
        let request = DescriptionRequest {
            description: Some(String::new()),
        };
        assert!(!request.validate_all().valid);
    }
}
