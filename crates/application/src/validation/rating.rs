//! Rating request validation

use super::{parse_id, required, Validatable, ValidationResult, ValidationRules, ValidatorExt};
use crate::ApplicationResult;
use serde::{Deserialize, Serialize};
use travel_health_domain::{CityId, HealthScores};
use validator::Validate;

/// Leave a general rating for a city
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGeneralRatingRequest {
    #[validate(required(message = "is required"))]
    pub city_id: Option<String>,

    #[validate(required(message = "is required"))]
    pub rating: Option<f64>,
}

impl Validatable for CreateGeneralRatingRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = self.to_validation_result();
        if let Some(city_id) = &self.city_id {
            result.merge(ValidationRules::validate_id::<CityId>(city_id, "cityId"));
        }
        if let Some(rating) = self.rating {
            result.merge(ValidationRules::validate_rating(rating, "rating"));
        }
        result
    }
}

impl CreateGeneralRatingRequest {
    pub fn into_parts(self) -> ApplicationResult<(CityId, f64)> {
        let city_id = parse_id(&required(self.city_id, "cityId")?, "City")?;
        Ok((city_id, required(self.rating, "rating")?))
    }
}

/// Change the value of an existing general rating
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGeneralRatingRequest {
    #[validate(required(message = "is required"))]
    pub rating: Option<f64>,
}

impl Validatable for UpdateGeneralRatingRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = self.to_validation_result();
        if let Some(rating) = self.rating {
            result.merge(ValidationRules::validate_rating(rating, "rating"));
        }
        result
    }
}

impl UpdateGeneralRatingRequest {
    pub fn into_rating(self) -> ApplicationResult<f64> {
        required(self.rating, "rating")
    }
}

/// The five health scores, each required and range-checked
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthScoresInput {
    pub language_support: Option<f64>,
    pub water_safety: Option<f64>,
    pub food_safety: Option<f64>,
    pub health_risk: Option<f64>,
    pub air_quality: Option<f64>,
}

impl HealthScoresInput {
    fn values(&self) -> [(&'static str, Option<f64>); 5] {
        let names = HealthScores::FIELD_NAMES;
        [
            (names[0], self.language_support),
            (names[1], self.water_safety),
            (names[2], self.food_safety),
            (names[3], self.health_risk),
            (names[4], self.air_quality),
        ]
    }

    pub fn into_scores(self) -> ApplicationResult<HealthScores> {
        Ok(HealthScores {
            language_support: required(self.language_support, "languageSupport")?,
            water_safety: required(self.water_safety, "waterSafety")?,
            food_safety: required(self.food_safety, "foodSafety")?,
            health_risk: required(self.health_risk, "healthRisk")?,
            air_quality: required(self.air_quality, "airQuality")?,
        })
    }
}

impl Validatable for HealthScoresInput {
    fn validate_all(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        for (field, value) in self.values() {
            match value {
                Some(value) => result.merge(ValidationRules::validate_rating(value, field)),
                None => result.add_field_error(field, "is required"),
            }
        }
        result
    }
}

/// Leave a health rating for a city
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHealthRatingRequest {
    #[validate(required(message = "is required"))]
    pub city_id: Option<String>,

    #[serde(flatten)]
    pub scores: HealthScoresInput,
}

impl Validatable for CreateHealthRatingRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = self.to_validation_result();
        if let Some(city_id) = &self.city_id {
            result.merge(ValidationRules::validate_id::<CityId>(city_id, "cityId"));
        }
        result.merge(self.scores.validate_all());
        result
    }
}

impl CreateHealthRatingRequest {
    pub fn into_parts(self) -> ApplicationResult<(CityId, HealthScores)> {
        let city_id = parse_id(&required(self.city_id, "cityId")?, "City")?;
        Ok((city_id, self.scores.into_scores()?))
    }
}

/// Replace all five scores of a health rating
pub type UpdateHealthRatingRequest = HealthScoresInput;

#[cfg(test)]
mod tests {
    use super::*;

    fn full_scores() -> HealthScoresInput {
        HealthScoresInput {
            language_support: Some(4.0),
            water_safety: Some(3.0),
            food_safety: Some(5.0),
            health_risk: Some(1.0),
            air_quality: Some(2.5),
        }
    }

    #[test]
    fn test_general_rating_out_of_range() {
        let request = CreateGeneralRatingRequest {
            city_id: Some(CityId::new().to_string()),
            rating: Some(5.5),
        };
        let result = request.validate_all();
        assert!(result.field_errors.contains_key("rating"));
    }

    #[test]
    fn test_general_rating_bad_city_id() {
        let request = CreateGeneralRatingRequest {
            city_id: Some("city-1".to_string()),
            rating: Some(3.0),
        };
        assert!(request.validate_all().field_errors.contains_key("cityId"));
    }

    #[test]
    fn test_health_scores_all_required() {
        let mut scores = full_scores();
        scores.air_quality = None;
        let result = scores.validate_all();
        assert!(!result.valid);
        assert!(result.field_errors.contains_key("airQuality"));
    }

    #[test]
    fn test_health_scores_range() {
        let mut scores = full_scores();
        scores.water_safety = Some(-0.5);
        assert!(scores.validate_all().field_errors.contains_key("waterSafety"));
    }

    #[test]
    fn test_create_health_rating_reads_flat_json() {
        let city = CityId::new();
        let json = format!(
            r#"{{"cityId":"{}","languageSupport":4,"waterSafety":2,"foodSafety":3,"healthRisk":1,"airQuality":5}}"#,
            city
        );
        let request: CreateHealthRatingRequest = serde_json::from_str(&json).unwrap();
        assert!(request.validate_all().valid);

        let (parsed_city, scores) = request.into_parts().unwrap();
        assert_eq!(parsed_city, city);
        assert_eq!(scores.health_risk, 1.0);
    }
}
