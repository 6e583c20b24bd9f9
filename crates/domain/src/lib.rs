//! Travel Health Domain Types
//!
//! This crate provides the core domain model for the travel health service:
//! cities and the health-travel records attached to them.
//!
//! ## Architecture
//!
//! - **identifiers**: Strongly-typed UUID-based identifiers for all entities
//! - **city**: Cities and the composed detail/overview views
//! - **rating**: General and health ratings, and the rating aggregator
//! - **children**: Hospitals, vaccines and common illnesses behind [`CityChild`]
//! - **emergency**: Emergency information and ambulance services
//! - **insurance**: Travel insurance information
//!
//! ## Usage
//!
//! ```rust
//! use travel_health_domain::{
//!     identifiers::CityId,
//!     rating::{average_general_rating, GeneralRating},
//! };
//!
//! let city = CityId::new();
//! let ratings = vec![GeneralRating::new(city, 4.0), GeneralRating::new(city, 5.0)];
//! assert_eq!(average_general_rating(&ratings), 4.5);
//! assert_eq!(average_general_rating(&[]), 0.0);
//! ```

#![warn(clippy::all)]

pub mod children;
pub mod city;
pub mod emergency;
pub mod identifiers;
pub mod insurance;
pub mod rating;

pub use identifiers::*;

pub use children::{
    CityChild, CommonIllness, Hospital, HospitalDraft, IllnessDraft, Vaccine, VaccineDraft,
};
pub use city::{City, CityAggregate, CityDescription, CityDetail, CityDraft, CityOverview};
pub use emergency::{
    AmbulanceService, AmbulanceServiceDraft, EmergencyDetails, EmergencyInfo, EmergencyInfoDraft,
    EmergencyInfoUpdate,
};
pub use insurance::{InsuranceDraft, InsuranceInfo};
pub use rating::{
    aggregate, average_general_rating, average_health_ratings, is_valid_rating, GeneralRating,
    HealthRating, HealthScores, MAX_RATING, MIN_RATING,
};
