//! Insurance information request validation

use super::{parse_id, required, Validatable, ValidationResult, ValidationRules, ValidatorExt};
use crate::ApplicationResult;
use serde::{Deserialize, Serialize};
use travel_health_domain::{CityId, InsuranceDraft};
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInsuranceRequest {
    #[validate(required(message = "is required"))]
    pub city_id: Option<String>,

    #[validate(required(message = "is required"))]
    pub international_accepted: Option<bool>,

    #[validate(required(message = "is required"))]
    pub travel_insurance_recommended: Option<bool>,
}

impl Validatable for CreateInsuranceRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = self.to_validation_result();
        if let Some(city_id) = &self.city_id {
            result.merge(ValidationRules::validate_id::<CityId>(city_id, "cityId"));
        }
        result
    }
}

impl CreateInsuranceRequest {
    pub fn into_parts(self) -> ApplicationResult<(CityId, InsuranceDraft)> {
        let city_id = parse_id(&required(self.city_id, "cityId")?, "City")?;
        let draft = InsuranceDraft {
            international_accepted: required(
                self.international_accepted,
                "internationalAccepted",
            )?,
            travel_insurance_recommended: required(
                self.travel_insurance_recommended,
                "travelInsuranceRecommended",
            )?,
        };
        Ok((city_id, draft))
    }
}

/// Both flags are replaced together
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInsuranceRequest {
    #[validate(required(message = "is required"))]
    pub international_accepted: Option<bool>,

    #[validate(required(message = "is required"))]
    pub travel_insurance_recommended: Option<bool>,
}

impl Validatable for UpdateInsuranceRequest {
    fn validate_all(&self) -> ValidationResult {
        self.to_validation_result()
    }
}

impl UpdateInsuranceRequest {
    pub fn into_draft(self) -> ApplicationResult<InsuranceDraft> {
        Ok(InsuranceDraft {
            international_accepted: required(
                self.international_accepted,
                "internationalAccepted",
            )?,
            travel_insurance_recommended: required(
                self.travel_insurance_recommended,
                "travelInsuranceRecommended",
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_requires_both_flags() {
        let request = UpdateInsuranceRequest {
            international_accepted: Some(true),
            travel_insurance_recommended: None,
        };
        assert!(!request.validate_all().valid);
    }

    #[test]
    fn test_false_flags_count_as_present() {
        let request = CreateInsuranceRequest {
            city_id: Some(CityId::new().to_string()),
            international_accepted: Some(false),
            travel_insurance_recommended: Some(false),
        };
        assert!(request.validate_all().valid);
        let (_, draft) = request.into_parts().unwrap();
        assert!(!draft.international_accepted);
    }
}
