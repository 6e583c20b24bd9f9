//! Fluent builder for seeding a store with a populated city.

use travel_health_domain::{City, GeneralRating, HealthRating};

use crate::fixtures::{
    create_test_city, create_test_emergency, create_test_general_rating,
    create_test_health_rating, create_test_hospital, create_test_illness, create_test_insurance,
    create_test_vaccine,
};
use crate::mocks::InMemoryStore;

/// Builder for a city and the records attached to it
#[derive(Clone)]
pub struct CityBuilder {
    city: City,
    general_ratings: Vec<f64>,
    health_ratings: usize,
    hospitals: usize,
    vaccines: usize,
    illnesses: usize,
    emergency: bool,
    insurance: bool,
}

impl CityBuilder {
    pub fn new() -> Self {
        Self {
            city: create_test_city(),
            general_ratings: vec![4.0],
            health_ratings: 0,
            hospitals: 0,
            vaccines: 0,
            illnesses: 0,
            emergency: false,
            insurance: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.city.name = name.into();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.city.country = country.into();
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.city.image_url = Some(url.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.city.description = Some(description.into());
        self
    }

    /// Replace the default single 4.0 rating
    pub fn with_general_ratings(mut self, ratings: &[f64]) -> Self {
        self.general_ratings = ratings.to_vec();
        self
    }

    pub fn with_health_ratings(mut self, count: usize) -> Self {
        self.health_ratings = count;
        self
    }

    pub fn with_hospitals(mut self, count: usize) -> Self {
        self.hospitals = count;
        self
    }

    pub fn with_vaccines(mut self, count: usize) -> Self {
        self.vaccines = count;
        self
    }

    pub fn with_illnesses(mut self, count: usize) -> Self {
        self.illnesses = count;
        self
    }

    pub fn with_emergency(mut self) -> Self {
        self.emergency = true;
        self
    }

    pub fn with_insurance(mut self) -> Self {
        self.insurance = true;
        self
    }

    /// Every record attached
    pub fn complete(self) -> Self {
        self.with_health_ratings(2)
            .with_hospitals(2)
            .with_vaccines(2)
            .with_illnesses(2)
            .with_emergency()
            .with_insurance()
    }

    pub fn build(self) -> City {
        self.city
    }

    /// Write the city and its records into `store`
    pub fn insert(self, store: &InMemoryStore) -> City {
        let city = self.city;
        let id = city.id;
        store.seed(|tables| {
            tables.cities.push(city.clone());
            tables.general_ratings.extend(
                self.general_ratings
                    .iter()
                    .map(|&rating| create_test_general_rating(id, rating)),
            );
            tables
                .health_ratings
                .extend((0..self.health_ratings).map(|_| create_test_health_rating(id)));
            tables
                .hospitals
                .extend((0..self.hospitals).map(|_| create_test_hospital(id)));
            tables
                .vaccines
                .extend((0..self.vaccines).map(|_| create_test_vaccine(id)));
            tables
                .illnesses
                .extend((0..self.illnesses).map(|_| create_test_illness(id)));
            if self.emergency {
                tables.emergency.push(create_test_emergency(id));
            }
            if self.insurance {
                tables.insurance.push(create_test_insurance(id));
            }
        });
        city
    }
}

impl Default for CityBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Ratings seeded for `city`, for asserting on averages
pub fn ratings_of(store: &InMemoryStore, city: &City) -> (Vec<GeneralRating>, Vec<HealthRating>) {
    let tables = store.snapshot();
    (
        tables
            .general_ratings
            .into_iter()
            .filter(|r| r.city_id == city.id)
            .collect(),
        tables
            .health_ratings
            .into_iter()
            .filter(|r| r.city_id == city.id)
            .collect(),
    )
}
