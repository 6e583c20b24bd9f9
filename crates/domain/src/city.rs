//! Cities and the composed views served to clients.

use crate::children::{CommonIllness, Hospital, Vaccine};
use crate::emergency::EmergencyDetails;
use crate::identifiers::CityId;
use crate::insurance::InsuranceInfo;
use crate::rating::{
    average_general_rating, average_health_ratings, GeneralRating, HealthRating, HealthScores,
};
use serde::{Deserialize, Serialize};

/// A destination city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub country: String,
    pub overview: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Values for a new city
#[derive(Debug, Clone, PartialEq)]
pub struct CityDraft {
    pub name: String,
    pub country: String,
    pub overview: String,
}

impl City {
    pub fn from_draft(draft: CityDraft) -> Self {
        Self {
            id: CityId::new(),
            name: draft.name,
            country: draft.country,
            overview: draft.overview,
            description: None,
            image_url: None,
        }
    }
}

/// A city with every record attached to it, as loaded from storage
#[derive(Debug, Clone, PartialEq)]
pub struct CityAggregate {
    pub city: City,
    pub general_ratings: Vec<GeneralRating>,
    pub health_ratings: Vec<HealthRating>,
    pub hospitals: Vec<Hospital>,
    pub vaccines: Vec<Vaccine>,
    pub common_illnesses: Vec<CommonIllness>,
    pub emergency_info: Option<EmergencyDetails>,
    pub insurance_info: Option<InsuranceInfo>,
}

impl CityAggregate {
    /// An aggregate with no attached records.
    pub fn bare(city: City) -> Self {
        Self {
            city,
            general_ratings: Vec::new(),
            health_ratings: Vec::new(),
            hospitals: Vec::new(),
            vaccines: Vec::new(),
            common_illnesses: Vec::new(),
            emergency_info: None,
            insurance_info: None,
        }
    }

    /// Attach the derived rating averages.
    pub fn into_detail(self) -> CityDetail {
        let average_general_rating = average_general_rating(&self.general_ratings);
        let average_health_ratings = average_health_ratings(&self.health_ratings);
        CityDetail {
            city: self.city,
            general_ratings: self.general_ratings,
            health_ratings: self.health_ratings,
            hospitals: self.hospitals,
            vaccines: self.vaccines,
            common_illnesses: self.common_illnesses,
            emergency_info: self.emergency_info,
            insurance_info: self.insurance_info,
            average_general_rating,
            average_health_ratings,
        }
    }
}

/// Full city view with its rating averages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDetail {
    #[serde(flatten)]
    pub city: City,
    pub general_ratings: Vec<GeneralRating>,
    pub health_ratings: Vec<HealthRating>,
    pub hospitals: Vec<Hospital>,
    pub vaccines: Vec<Vaccine>,
    pub common_illnesses: Vec<CommonIllness>,
    pub emergency_info: Option<EmergencyDetails>,
    pub insurance_info: Option<InsuranceInfo>,
    pub average_general_rating: f64,
    pub average_health_ratings: HealthScores,
}

/// Summary row for the city listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityOverview {
    pub id: CityId,
    pub name: String,
    pub country: String,
    pub overview: String,
    pub image_url: Option<String>,
    pub average_general_rating: f64,
}

impl CityOverview {
    pub fn new(city: City, general_ratings: &[GeneralRating]) -> Self {
        Self {
            id: city.id,
            name: city.name,
            country: city.country,
            overview: city.overview,
            image_url: city.image_url,
            average_general_rating: average_general_rating(general_ratings),
        }
    }
}

/// A city's long-form description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDescription {
    pub id: CityId,
    pub description: Option<String>,
}

impl From<&City> for CityDescription {
    fn from(city: &City) -> Self {
        Self {
            id: city.id,
            description: city.description.clone(),
        }
    }
}
