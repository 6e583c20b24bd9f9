//! Application Services
//!
//! Use cases over the travel health model. Each service owns the repository
//! port it depends on; the infrastructure crate provides PostgreSQL
//! implementations and the testing crate an in-memory one.

mod child;
mod city;
mod emergency;
mod insurance;
mod rating;

pub use child::*;
pub use city::*;
pub use emergency::*;
pub use insurance::*;
pub use rating::*;

use std::sync::Arc;
use travel_health_domain::{CommonIllness, Hospital, Vaccine};

/// Every repository port the services need, behind trait objects
#[derive(Clone)]
pub struct RepositorySet {
    pub cities: Arc<dyn CityRepositoryPort>,
    pub ratings: Arc<dyn RatingRepositoryPort>,
    pub hospitals: Arc<dyn ChildRepositoryPort<Hospital>>,
    pub vaccines: Arc<dyn ChildRepositoryPort<Vaccine>>,
    pub illnesses: Arc<dyn ChildRepositoryPort<CommonIllness>>,
    pub emergency: Arc<dyn EmergencyRepositoryPort>,
    pub insurance: Arc<dyn InsuranceRepositoryPort>,
}

/// The full set of application services
#[derive(Clone)]
pub struct Services {
    pub cities: Arc<CityService>,
    pub ratings: Arc<RatingService>,
    pub hospitals: Arc<CityChildService<Hospital>>,
    pub vaccines: Arc<CityChildService<Vaccine>>,
    pub illnesses: Arc<CityChildService<CommonIllness>>,
    pub emergency: Arc<EmergencyService>,
    pub insurance: Arc<InsuranceService>,
}

impl Services {
    pub fn new(repos: RepositorySet) -> Self {
        Self {
            cities: Arc::new(CityService::new(repos.cities)),
            ratings: Arc::new(RatingService::new(repos.ratings)),
            hospitals: Arc::new(CityChildService::new(repos.hospitals)),
            vaccines: Arc::new(CityChildService::new(repos.vaccines)),
            illnesses: Arc::new(CityChildService::new(repos.illnesses)),
            emergency: Arc::new(EmergencyService::new(repos.emergency)),
            insurance: Arc::new(InsuranceService::new(repos.insurance)),
        }
    }
}

/// Access to the child service for a given collection type
pub trait ChildServices<C: travel_health_domain::CityChild> {
    fn child_service(&self) -> &Arc<CityChildService<C>>;
}

impl ChildServices<Hospital> for Services {
    fn child_service(&self) -> &Arc<CityChildService<Hospital>> {
        &self.hospitals
    }
}

impl ChildServices<Vaccine> for Services {
    fn child_service(&self) -> &Arc<CityChildService<Vaccine>> {
        &self.vaccines
    }
}

impl ChildServices<CommonIllness> for Services {
    fn child_service(&self) -> &Arc<CityChildService<CommonIllness>> {
        &self.illnesses
    }
}
