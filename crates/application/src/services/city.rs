//! City Service
//!
//! City creation, the composed detail and overview reads, and the image and
//! description fields.

use crate::validation::{
    parse_id, CreateCityRequest, DescriptionRequest, UpdateImageRequest, Validatable,
};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use std::sync::Arc;
use travel_health_domain::{
    City, CityAggregate, CityDescription, CityDetail, CityId, CityOverview, GeneralRating,
};
use tracing::{debug, info, instrument};

/// City repository trait (to be implemented by infrastructure)
#[async_trait]
pub trait CityRepositoryPort: Send + Sync {
    /// Insert the city and its first general rating in one transaction.
    async fn create_with_rating(
        &self,
        city: &City,
        rating: &GeneralRating,
    ) -> Result<(), ApplicationError>;

    async fn get(&self, id: CityId) -> Result<Option<City>, ApplicationError>;

    /// Every city with all of its records
    async fn list_aggregates(&self) -> Result<Vec<CityAggregate>, ApplicationError>;

    async fn get_aggregate(&self, id: CityId) -> Result<Option<CityAggregate>, ApplicationError>;

    /// Every city with its general ratings only
    async fn list_with_general_ratings(
        &self,
    ) -> Result<Vec<(City, Vec<GeneralRating>)>, ApplicationError>;

    /// Returns the updated city, or `None` when it does not exist.
    async fn set_image_url(
        &self,
        id: CityId,
        image_url: &str,
    ) -> Result<Option<City>, ApplicationError>;

    /// Returns the updated city, or `None` when it does not exist.
    async fn set_description(
        &self,
        id: CityId,
        description: Option<&str>,
    ) -> Result<Option<City>, ApplicationError>;
}

/// A newly created city with its initial rating
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCity {
    #[serde(flatten)]
    pub city: City,
    pub general_ratings: Vec<GeneralRating>,
}

/// City service implementation
pub struct CityService {
    repository: Arc<dyn CityRepositoryPort>,
}

impl CityService {
    pub fn new(repository: Arc<dyn CityRepositoryPort>) -> Self {
        Self { repository }
    }

    /// Create a city together with its first general rating
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: CreateCityRequest) -> ApplicationResult<CreatedCity> {
        request.validate_all().ensure_valid()?;

        let (draft, rating) = request.into_draft()?;
        let city = City::from_draft(draft);
        let rating = GeneralRating::new(city.id, rating);

        self.repository.create_with_rating(&city, &rating).await?;

        info!(city_id = %city.id, name = %city.name, "City created");
        Ok(CreatedCity {
            city,
            general_ratings: vec![rating],
        })
    }

    /// Every city with its records and rating averages
    #[instrument(skip(self))]
    pub async fn list(&self) -> ApplicationResult<Vec<CityDetail>> {
        let cities = self.repository.list_aggregates().await?;
        debug!(count = cities.len(), "Listed cities");
        Ok(cities.into_iter().map(CityAggregate::into_detail).collect())
    }

    /// Summary rows with the average general rating
    #[instrument(skip(self))]
    pub async fn overview(&self) -> ApplicationResult<Vec<CityOverview>> {
        let cities = self.repository.list_with_general_ratings().await?;
        Ok(cities
            .into_iter()
            .map(|(city, ratings)| CityOverview::new(city, &ratings))
            .collect())
    }

    /// One city with its records and rating averages
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> ApplicationResult<CityDetail> {
        let id: CityId = parse_id(id, "City")?;
        self.repository
            .get_aggregate(id)
            .await?
            .map(CityAggregate::into_detail)
            .ok_or_else(ApplicationError::city_not_found)
    }

    /// Store an already-resolved image URL
    #[instrument(skip(self, request))]
    pub async fn set_image(&self, id: &str, request: UpdateImageRequest) -> ApplicationResult<City> {
        let id: CityId = parse_id(id, "City")?;
        request.validate_all().ensure_valid()?;
        let url = request.into_url()?;

        let city = self
            .repository
            .set_image_url(id, &url)
            .await?
            .ok_or_else(ApplicationError::city_not_found)?;

        info!(city_id = %id, "City image updated");
        Ok(city)
    }

    /// Set or replace the description
    #[instrument(skip(self, request))]
    pub async fn set_description(
        &self,
        id: &str,
        request: DescriptionRequest,
    ) -> ApplicationResult<City> {
        let id: CityId = parse_id(id, "City")?;
        request.validate_all().ensure_valid()?;
        let description = request.into_description()?;

        let city = self
            .repository
            .set_description(id, Some(&description))
            .await?
            .ok_or_else(ApplicationError::city_not_found)?;

        info!(city_id = %id, "City description updated");
        Ok(city)
    }

    #[instrument(skip(self))]
    pub async fn get_description(&self, id: &str) -> ApplicationResult<CityDescription> {
        let id: CityId = parse_id(id, "City")?;
        self.repository
            .get(id)
            .await?
            .map(|city| CityDescription::from(&city))
            .ok_or_else(ApplicationError::city_not_found)
    }

    /// Clear the description, leaving it null
    #[instrument(skip(self))]
    pub async fn clear_description(&self, id: &str) -> ApplicationResult<City> {
        let id: CityId = parse_id(id, "City")?;
        let city = self
            .repository
            .set_description(id, None)
            .await?
            .ok_or_else(ApplicationError::city_not_found)?;

        info!(city_id = %id, "City description cleared");
        Ok(city)
    }
}
