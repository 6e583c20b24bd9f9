//! Test fixtures for generating domain entities and requests with realistic data.

use fake::{
    faker::{
        address::en::{CityName, CountryName, StreetName},
        lorem::en::{Sentence, Word},
        phone_number::en::PhoneNumber,
    },
    Fake,
};
use travel_health_application::validation::{
    AmbulanceServiceInput, CreateChildRequest, CreateCityRequest, CreateEmergencyRequest,
    CreateGeneralRatingRequest, CreateHealthRatingRequest, CreateInsuranceRequest,
    HealthScoresInput, HospitalInput, IllnessInput, ReplaceChildrenRequest, VaccineInput,
};
use travel_health_domain::{
    AmbulanceServiceDraft, City, CityChild, CityDraft, CityId, CommonIllness, EmergencyDetails,
    EmergencyInfoDraft, GeneralRating, HealthRating, HealthScores, Hospital, HospitalDraft,
    IllnessDraft, InsuranceDraft, InsuranceInfo, Vaccine, VaccineDraft,
};

/// A rating on the half-point grid between 0 and 5
pub fn fake_rating() -> f64 {
    f64::from((0..=10).fake::<u8>()) / 2.0
}

// ============================================================================
// Domain entities
// ============================================================================

pub fn create_test_city() -> City {
    City::from_draft(CityDraft {
        name: CityName().fake(),
        country: CountryName().fake(),
        overview: Sentence(4..10).fake(),
    })
}

pub fn create_test_city_named(name: &str) -> City {
    City {
        name: name.to_string(),
        ..create_test_city()
    }
}

pub fn create_test_general_rating(city_id: CityId, rating: f64) -> GeneralRating {
    GeneralRating::new(city_id, rating)
}

pub fn create_test_health_rating(city_id: CityId) -> HealthRating {
    HealthRating::new(
        city_id,
        HealthScores {
            language_support: fake_rating(),
            water_safety: fake_rating(),
            food_safety: fake_rating(),
            health_risk: fake_rating(),
            air_quality: fake_rating(),
        },
    )
}

pub fn hospital_draft() -> HospitalDraft {
    HospitalDraft {
        name: format!("{} General Hospital", CityName().fake::<String>()),
        address: format!("{} {}", (1..500).fake::<u16>(), StreetName().fake::<String>()),
        contact: PhoneNumber().fake(),
        open_24_hours: true,
    }
}

pub fn create_test_hospital(city_id: CityId) -> Hospital {
    Hospital::from_draft(city_id, hospital_draft())
}

pub fn create_test_vaccine(city_id: CityId) -> Vaccine {
    Vaccine::from_draft(
        city_id,
        VaccineDraft {
            vaccine: Word().fake(),
            importance: (1..=5).fake(),
        },
    )
}

pub fn create_test_illness(city_id: CityId) -> CommonIllness {
    CommonIllness::from_draft(
        city_id,
        IllnessDraft {
            illness: Word().fake(),
        },
    )
}

pub fn create_test_emergency(city_id: CityId) -> EmergencyDetails {
    EmergencyInfoDraft {
        city_id,
        emergency_phone: "112".to_string(),
        ambulance_service: Some(AmbulanceServiceDraft {
            available: true,
            lowest_fees: 0.0,
            highest_fees: 120.0,
            response_time: "15 minutes".to_string(),
        }),
    }
    .into_details()
}

pub fn create_test_insurance(city_id: CityId) -> InsuranceInfo {
    InsuranceInfo::new(
        city_id,
        InsuranceDraft {
            international_accepted: true,
            travel_insurance_recommended: true,
        },
    )
}

// ============================================================================
// Requests
// ============================================================================

pub fn create_city_request() -> CreateCityRequest {
    CreateCityRequest {
        name: Some(CityName().fake()),
        country: Some(CountryName().fake()),
        overview: Some(Sentence(4..10).fake()),
        general_rating: Some(4.0),
    }
}

pub fn general_rating_request(city_id: CityId, rating: f64) -> CreateGeneralRatingRequest {
    CreateGeneralRatingRequest {
        city_id: Some(city_id.to_string()),
        rating: Some(rating),
    }
}

pub fn health_scores_input(scores: [f64; 5]) -> HealthScoresInput {
    let [language_support, water_safety, food_safety, health_risk, air_quality] = scores;
    HealthScoresInput {
        language_support: Some(language_support),
        water_safety: Some(water_safety),
        food_safety: Some(food_safety),
        health_risk: Some(health_risk),
        air_quality: Some(air_quality),
    }
}

pub fn health_rating_request(city_id: CityId, scores: [f64; 5]) -> CreateHealthRatingRequest {
    CreateHealthRatingRequest {
        city_id: Some(city_id.to_string()),
        scores: health_scores_input(scores),
    }
}

pub fn hospital_input(name: &str) -> HospitalInput {
    let draft = hospital_draft();
    HospitalInput {
        name: Some(name.to_string()),
        address: Some(draft.address),
        contact: Some(draft.contact),
        open_24_hours: Some(draft.open_24_hours),
    }
}

pub fn vaccine_input(vaccine: &str, importance: i32) -> VaccineInput {
    VaccineInput {
        vaccine: Some(vaccine.to_string()),
        importance: Some(importance),
    }
}

pub fn illness_input(illness: &str) -> IllnessInput {
    IllnessInput::Name(illness.to_string())
}

pub fn create_child_request<I>(city_id: CityId, item: I) -> CreateChildRequest<I> {
    CreateChildRequest {
        city_id: Some(city_id.to_string()),
        item,
    }
}

pub fn replace_request<I>(items: Vec<I>) -> ReplaceChildrenRequest<I> {
    ReplaceChildrenRequest { items: Some(items) }
}

pub fn ambulance_input() -> AmbulanceServiceInput {
    AmbulanceServiceInput {
        available: Some(true),
        lowest_fees: Some(20.0),
        highest_fees: Some(150.0),
        response_time: Some("20 minutes".to_string()),
    }
}

pub fn emergency_request(city_id: CityId) -> CreateEmergencyRequest {
    CreateEmergencyRequest {
        city_id: Some(city_id.to_string()),
        emergency_phone: Some(PhoneNumber().fake()),
        ambulance_service: Some(ambulance_input()),
    }
}

pub fn insurance_request(city_id: CityId) -> CreateInsuranceRequest {
    CreateInsuranceRequest {
        city_id: Some(city_id.to_string()),
        international_accepted: Some(true),
        travel_insurance_recommended: Some(false),
    }
}
