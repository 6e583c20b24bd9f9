//! Travel insurance guidance for a city.

use crate::identifiers::{CityId, InsuranceInfoId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceInfo {
    pub id: InsuranceInfoId,
    pub city_id: CityId,
    pub international_accepted: bool,
    pub travel_insurance_recommended: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsuranceDraft {
    pub international_accepted: bool,
    pub travel_insurance_recommended: bool,
}

impl InsuranceInfo {
    pub fn new(city_id: CityId, draft: InsuranceDraft) -> Self {
        Self {
            id: InsuranceInfoId::new(),
            city_id,
            international_accepted: draft.international_accepted,
            travel_insurance_recommended: draft.travel_insurance_recommended,
        }
    }

    pub fn apply(&mut self, draft: InsuranceDraft) {
        self.international_accepted = draft.international_accepted;
        self.travel_insurance_recommended = draft.travel_insurance_recommended;
    }
}
