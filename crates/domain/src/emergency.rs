//! Emergency information and the ambulance service attached to it.

use crate::identifiers::{AmbulanceServiceId, CityId, EmergencyInfoId};
use serde::{Deserialize, Serialize};

/// A city's emergency contact details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyInfo {
    pub id: EmergencyInfoId,
    pub city_id: CityId,
    pub emergency_phone: String,
}

/// Ambulance availability and pricing for a city's emergency information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbulanceService {
    pub id: AmbulanceServiceId,
    pub emergency_info_id: EmergencyInfoId,
    pub available: bool,
    pub lowest_fees: f64,
    pub highest_fees: f64,
    pub response_time: String,
}

impl AmbulanceService {
    pub fn from_draft(emergency_info_id: EmergencyInfoId, draft: AmbulanceServiceDraft) -> Self {
        Self {
            id: AmbulanceServiceId::new(),
            emergency_info_id,
            available: draft.available,
            lowest_fees: draft.lowest_fees,
            highest_fees: draft.highest_fees,
            response_time: draft.response_time,
        }
    }

    /// Overwrite every field from `draft`, keeping the id.
    pub fn apply(&mut self, draft: AmbulanceServiceDraft) {
        self.available = draft.available;
        self.lowest_fees = draft.lowest_fees;
        self.highest_fees = draft.highest_fees;
        self.response_time = draft.response_time;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmbulanceServiceDraft {
    pub available: bool,
    pub lowest_fees: f64,
    pub highest_fees: f64,
    pub response_time: String,
}

/// Emergency information together with its ambulance service, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyDetails {
    #[serde(flatten)]
    pub info: EmergencyInfo,
    pub ambulance_service: Option<AmbulanceService>,
}

/// Values for a new emergency record
#[derive(Debug, Clone, PartialEq)]
pub struct EmergencyInfoDraft {
    pub city_id: CityId,
    pub emergency_phone: String,
    pub ambulance_service: Option<AmbulanceServiceDraft>,
}

impl EmergencyInfoDraft {
    /// Assign ids to the emergency record and its ambulance service.
    pub fn into_details(self) -> EmergencyDetails {
        let info = EmergencyInfo {
            id: EmergencyInfoId::new(),
            city_id: self.city_id,
            emergency_phone: self.emergency_phone,
        };
        let ambulance_service = self
            .ambulance_service
            .map(|draft| AmbulanceService::from_draft(info.id, draft));
        EmergencyDetails {
            info,
            ambulance_service,
        }
    }
}

/// Partial update of an emergency record. The ambulance service is upserted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmergencyInfoUpdate {
    pub emergency_phone: Option<String>,
    pub ambulance_service: Option<AmbulanceServiceDraft>,
}

impl EmergencyInfoUpdate {
    pub fn is_empty(&self) -> bool {
        self.emergency_phone.is_none() && self.ambulance_service.is_none()
    }

    /// Apply the update to an existing record, creating the ambulance
    /// service when the record had none.
    pub fn apply_to(self, details: &mut EmergencyDetails) {
        if let Some(phone) = self.emergency_phone {
            details.info.emergency_phone = phone;
        }
        if let Some(draft) = self.ambulance_service {
            match details.ambulance_service.as_mut() {
                Some(existing) => existing.apply(draft),
                None => {
                    details.ambulance_service =
                        Some(AmbulanceService::from_draft(details.info.id, draft));
                }
            }
        }
    }
}
