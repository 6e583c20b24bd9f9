//! Per-city child collections: hospitals, recommended vaccines and common
//! illnesses.
//!
//! The three share one lifecycle (create, batch create, list by city,
//! delete by id list, replace-all for a city). [`CityChild`] captures what
//! that lifecycle needs so it can be written once.

use crate::identifiers::{CityId, HospitalId, IllnessId, VaccineId};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

/// An entity owned by a city and managed as a replaceable collection.
pub trait CityChild: Debug + Clone + PartialEq + Serialize + Send + Sync + 'static {
    /// Typed identifier of a row
    type Id: Debug + Copy + Eq + Hash + Display + FromStr + Send + Sync + 'static;

    /// Validated field values, without id or parent
    type Draft: Debug + Clone + PartialEq + Send + Sync + 'static;

    /// Singular display name, e.g. "Hospital"
    const NAME: &'static str;

    /// Lower-case plural, e.g. "hospitals"
    const PLURAL: &'static str;

    fn id(&self) -> Self::Id;

    fn city_id(&self) -> CityId;

    /// Builds a row from an already assigned id.
    fn from_parts(id: Self::Id, city_id: CityId, draft: Self::Draft) -> Self;

    /// Builds a row with a freshly generated id.
    fn from_draft(city_id: CityId, draft: Self::Draft) -> Self;

    /// The row's field values, without id or parent.
    fn to_draft(&self) -> Self::Draft;
}

// ============================================================================
// Hospital
// ============================================================================

/// A hospital in a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: HospitalId,
    pub city_id: CityId,
    pub name: String,
    pub address: String,
    pub contact: String,
    #[serde(rename = "open24Hours")]
    pub open_24_hours: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HospitalDraft {
    pub name: String,
    pub address: String,
    pub contact: String,
    pub open_24_hours: bool,
}

impl CityChild for Hospital {
    type Id = HospitalId;
    type Draft = HospitalDraft;

    const NAME: &'static str = "Hospital";
    const PLURAL: &'static str = "hospitals";

    fn id(&self) -> HospitalId {
        self.id
    }

    fn city_id(&self) -> CityId {
        self.city_id
    }

    fn from_parts(id: HospitalId, city_id: CityId, draft: HospitalDraft) -> Self {
        Self {
            id,
            city_id,
            name: draft.name,
            address: draft.address,
            contact: draft.contact,
            open_24_hours: draft.open_24_hours,
        }
    }

    fn from_draft(city_id: CityId, draft: HospitalDraft) -> Self {
        Self::from_parts(HospitalId::new(), city_id, draft)
    }

    fn to_draft(&self) -> HospitalDraft {
        HospitalDraft {
            name: self.name.clone(),
            address: self.address.clone(),
            contact: self.contact.clone(),
            open_24_hours: self.open_24_hours,
        }
    }
}

// ============================================================================
// Vaccine
// ============================================================================

/// A vaccine recommended before travelling to a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vaccine {
    pub id: VaccineId,
    pub city_id: CityId,
    pub vaccine: String,
    pub importance: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VaccineDraft {
    pub vaccine: String,
    pub importance: i32,
}

impl CityChild for Vaccine {
    type Id = VaccineId;
    type Draft = VaccineDraft;

    const NAME: &'static str = "Vaccine";
    const PLURAL: &'static str = "vaccines";

    fn id(&self) -> VaccineId {
        self.id
    }

    fn city_id(&self) -> CityId {
        self.city_id
    }

    fn from_parts(id: VaccineId, city_id: CityId, draft: VaccineDraft) -> Self {
        Self {
            id,
            city_id,
            vaccine: draft.vaccine,
            importance: draft.importance,
        }
    }

    fn from_draft(city_id: CityId, draft: VaccineDraft) -> Self {
        Self::from_parts(VaccineId::new(), city_id, draft)
    }

    fn to_draft(&self) -> VaccineDraft {
        VaccineDraft {
            vaccine: self.vaccine.clone(),
            importance: self.importance,
        }
    }
}

// ============================================================================
// Common illness
// ============================================================================

/// An illness travellers commonly pick up in a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonIllness {
    pub id: IllnessId,
    pub city_id: CityId,
    pub illness: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IllnessDraft {
    pub illness: String,
}

impl CityChild for CommonIllness {
    type Id = IllnessId;
    type Draft = IllnessDraft;

    const NAME: &'static str = "Common illness";
    const PLURAL: &'static str = "illnesses";

    fn id(&self) -> IllnessId {
        self.id
    }

    fn city_id(&self) -> CityId {
        self.city_id
    }

    fn from_parts(id: IllnessId, city_id: CityId, draft: IllnessDraft) -> Self {
        Self {
            id,
            city_id,
            illness: draft.illness,
        }
    }

    fn from_draft(city_id: CityId, draft: IllnessDraft) -> Self {
        Self::from_parts(IllnessId::new(), city_id, draft)
    }

    fn to_draft(&self) -> IllnessDraft {
        IllnessDraft {
            illness: self.illness.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_draft_assigns_fresh_ids() {
        let city = CityId::new();
        let draft = VaccineDraft {
            vaccine: "Typhoid".to_string(),
            importance: 2,
        };
        let a = Vaccine::from_draft(city, draft.clone());
        let b = Vaccine::from_draft(city, draft.clone());

        assert_ne!(a.id, b.id);
        assert_eq!(a.to_draft(), draft);
        assert_eq!(a.city_id(), city);
    }

    #[test]
    fn test_hospital_wire_names() {
        let hospital = Hospital::from_draft(
            CityId::new(),
            HospitalDraft {
                name: "St. Mary".to_string(),
                address: "1 Main St".to_string(),
                contact: "+1 555 0100".to_string(),
                open_24_hours: true,
            },
        );
        let json = serde_json::to_value(&hospital).unwrap();
        assert_eq!(json["open24Hours"], true);
        assert!(json.get("cityId").is_some());
    }
}
