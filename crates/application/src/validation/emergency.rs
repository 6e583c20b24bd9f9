//! Emergency information request validation

use super::{parse_id, required, Validatable, ValidationResult, ValidationRules, ValidatorExt};
use crate::ApplicationResult;
use serde::{Deserialize, Serialize};
use travel_health_domain::{
    AmbulanceServiceDraft, CityId, EmergencyInfoDraft, EmergencyInfoUpdate,
};
use validator::Validate;

/// Ambulance service fields. All are required whenever the object is sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AmbulanceServiceInput {
    #[validate(required(message = "is required"))]
    pub available: Option<bool>,

    #[validate(
        required(message = "is required"),
        range(min = 0.0, message = "must not be negative")
    )]
    pub lowest_fees: Option<f64>,

    #[validate(
        required(message = "is required"),
        range(min = 0.0, message = "must not be negative")
    )]
    pub highest_fees: Option<f64>,

    #[validate(
        required(message = "is required"),
        length(min = 1, message = "must not be empty")
    )]
    pub response_time: Option<String>,
}

impl Validatable for AmbulanceServiceInput {
    fn validate_all(&self) -> ValidationResult {
        let mut result = self.to_validation_result();
        if let (Some(lowest), Some(highest)) = (self.lowest_fees, self.highest_fees) {
            if lowest > highest {
                result.add_field_error("lowestFees", "must not exceed highestFees");
            }
        }
        result
    }
}

impl AmbulanceServiceInput {
    pub fn into_draft(self) -> ApplicationResult<AmbulanceServiceDraft> {
        Ok(AmbulanceServiceDraft {
            available: required(self.available, "available")?,
            lowest_fees: required(self.lowest_fees, "lowestFees")?,
            highest_fees: required(self.highest_fees, "highestFees")?,
            response_time: required(self.response_time, "responseTime")?,
        })
    }
}

/// Create a city's emergency information, optionally with its ambulance service
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmergencyRequest {
    #[validate(required(message = "is required"))]
    pub city_id: Option<String>,

    #[validate(
        required(message = "is required"),
        length(min = 1, max = 50, message = "must be between 1 and 50 characters")
    )]
    pub emergency_phone: Option<String>,

    pub ambulance_service: Option<AmbulanceServiceInput>,
}

impl Validatable for CreateEmergencyRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = self.to_validation_result();
        if let Some(city_id) = &self.city_id {
            result.merge(ValidationRules::validate_id::<CityId>(city_id, "cityId"));
        }
        if let Some(ambulance) = &self.ambulance_service {
            result.merge_nested("ambulanceService", ambulance.validate_all());
        }
        result
    }
}

impl CreateEmergencyRequest {
    pub fn into_draft(self) -> ApplicationResult<EmergencyInfoDraft> {
        Ok(EmergencyInfoDraft {
            city_id: parse_id(&required(self.city_id, "cityId")?, "City")?,
            emergency_phone: required(self.emergency_phone, "emergencyPhone")?,
            ambulance_service: self
                .ambulance_service
                .map(AmbulanceServiceInput::into_draft)
                .transpose()?,
        })
    }
}

/// Partial update of emergency information
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmergencyRequest {
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    pub emergency_phone: Option<String>,

    pub ambulance_service: Option<AmbulanceServiceInput>,
}

impl Validatable for UpdateEmergencyRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = self.to_validation_result();
        if self.emergency_phone.is_none() && self.ambulance_service.is_none() {
            result.add_object_error("At least one of emergencyPhone or ambulanceService is required");
        }
        if let Some(ambulance) = &self.ambulance_service {
            result.merge_nested("ambulanceService", ambulance.validate_all());
        }
        result
    }
}

impl UpdateEmergencyRequest {
    pub fn into_update(self) -> ApplicationResult<EmergencyInfoUpdate> {
        Ok(EmergencyInfoUpdate {
            emergency_phone: self.emergency_phone,
            ambulance_service: self
                .ambulance_service
                .map(AmbulanceServiceInput::into_draft)
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambulance_fields_required_when_present() {
        let request: CreateEmergencyRequest = serde_json::from_str(&format!(
            r#"{{"cityId":"{}","emergencyPhone":"112","ambulanceService":{{"available":true}}}}"#,
            CityId::new()
        ))
        .unwrap();
        let result = request.validate_all();
        assert!(!result.valid);
        assert!(result
            .field_errors
            .keys()
            .all(|key| key.starts_with("ambulanceService.")));
    }

    #[test]
    fn test_emergency_without_ambulance() {
        let request = CreateEmergencyRequest {
            city_id: Some(CityId::new().to_string()),
            emergency_phone: Some("911".to_string()),
            ambulance_service: None,
        };
        assert!(request.validate_all().valid);
        assert!(request.into_draft().unwrap().ambulance_service.is_none());
    }

    #[test]
    fn test_update_needs_a_field() {
        assert!(!UpdateEmergencyRequest::default().validate_all().valid);

        let request = UpdateEmergencyRequest {
            emergency_phone: Some("999".to_string()),
            ambulance_service: None,
        };
        assert!(request.validate_all().valid);
    }

    #[test]
    fn test_fee_order() {
        let ambulance = AmbulanceServiceInput {
            available: Some(true),
            lowest_fees: Some(100.0),
            highest_fees: Some(10.0),
            response_time: Some("10 min".to_string()),
        };
        assert!(!ambulance.validate_all().valid);
    }
}
