//! Rating Service
//!
//! General and health ratings. Reads return the rows together with their
//! averages, computed by the domain aggregator.

use crate::validation::{
    parse_id, CreateGeneralRatingRequest, CreateHealthRatingRequest, UpdateGeneralRatingRequest,
    UpdateHealthRatingRequest, Validatable,
};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use travel_health_domain::{
    average_general_rating, average_health_ratings, CityId, GeneralRating, GeneralRatingId,
    HealthRating, HealthRatingId, HealthScores,
};
use tracing::{info, instrument};

/// Rating repository trait (to be implemented by infrastructure)
#[async_trait]
pub trait RatingRepositoryPort: Send + Sync {
    async fn create_general(&self, rating: &GeneralRating) -> Result<(), ApplicationError>;

    async fn list_general(&self, city_id: CityId) -> Result<Vec<GeneralRating>, ApplicationError>;

    async fn update_general(
        &self,
        id: GeneralRatingId,
        rating: f64,
    ) -> Result<Option<GeneralRating>, ApplicationError>;

    async fn delete_general(
        &self,
        id: GeneralRatingId,
    ) -> Result<Option<GeneralRating>, ApplicationError>;

    async fn create_health(&self, rating: &HealthRating) -> Result<(), ApplicationError>;

    async fn list_health(&self, city_id: CityId) -> Result<Vec<HealthRating>, ApplicationError>;

    async fn update_health(
        &self,
        id: HealthRatingId,
        scores: HealthScores,
    ) -> Result<Option<HealthRating>, ApplicationError>;

    async fn delete_health(
        &self,
        id: HealthRatingId,
    ) -> Result<Option<HealthRating>, ApplicationError>;
}

/// A city's general ratings and their average
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralRatingSummary {
    pub ratings: Vec<GeneralRating>,
    pub average_rating: f64,
}

/// A city's health ratings and their per-field average
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRatingSummary {
    pub ratings: Vec<HealthRating>,
    pub average: HealthScores,
}

/// Rating service implementation
pub struct RatingService {
    repository: Arc<dyn RatingRepositoryPort>,
}

impl RatingService {
    pub fn new(repository: Arc<dyn RatingRepositoryPort>) -> Self {
        Self { repository }
    }

    // ------------------------------------------------------------------
    // General ratings
    // ------------------------------------------------------------------

    #[instrument(skip(self, request))]
    pub async fn create_general(
        &self,
        request: CreateGeneralRatingRequest,
    ) -> ApplicationResult<GeneralRating> {
        request.validate_all().ensure_valid()?;
        let (city_id, value) = request.into_parts()?;

        let rating = GeneralRating::new(city_id, value);
        self.repository.create_general(&rating).await?;

        info!(city_id = %city_id, rating_id = %rating.id, "General rating created");
        Ok(rating)
    }

    /// Ratings of a city with their average. `NotFound` when there are none.
    #[instrument(skip(self))]
    pub async fn general_for_city(&self, city_id: &str) -> ApplicationResult<GeneralRatingSummary> {
        let city_id: CityId = parse_id(city_id, "City")?;
        let ratings = self.repository.list_general(city_id).await?;

        if ratings.is_empty() {
            return Err(ApplicationError::NotFound(
                "No ratings found for this city".to_string(),
            ));
        }

        let average_rating = average_general_rating(&ratings);
        Ok(GeneralRatingSummary {
            ratings,
            average_rating,
        })
    }

    #[instrument(skip(self, request))]
    pub async fn update_general(
        &self,
        id: &str,
        request: UpdateGeneralRatingRequest,
    ) -> ApplicationResult<GeneralRating> {
        let id: GeneralRatingId = parse_id(id, "Rating")?;
        request.validate_all().ensure_valid()?;

        let rating = self
            .repository
            .update_general(id, request.into_rating()?)
            .await?
            .ok_or_else(|| ApplicationError::NotFound("Rating not found".to_string()))?;

        info!(rating_id = %id, "General rating updated");
        Ok(rating)
    }

    #[instrument(skip(self))]
    pub async fn delete_general(&self, id: &str) -> ApplicationResult<GeneralRating> {
        let id: GeneralRatingId = parse_id(id, "Rating")?;
        let rating = self
            .repository
            .delete_general(id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound("Rating not found".to_string()))?;

        info!(rating_id = %id, "General rating deleted");
        Ok(rating)
    }

    // ------------------------------------------------------------------
    // Health ratings
    // ------------------------------------------------------------------

    #[instrument(skip(self, request))]
    pub async fn create_health(
        &self,
        request: CreateHealthRatingRequest,
    ) -> ApplicationResult<HealthRating> {
        request.validate_all().ensure_valid()?;
        let (city_id, scores) = request.into_parts()?;

        let rating = HealthRating::new(city_id, scores);
        self.repository.create_health(&rating).await?;

        info!(city_id = %city_id, rating_id = %rating.id, "Health rating created");
        Ok(rating)
    }

    /// Health ratings of a city with their per-field average.
    /// `NotFound` when there are none.
    #[instrument(skip(self))]
    pub async fn health_for_city(&self, city_id: &str) -> ApplicationResult<HealthRatingSummary> {
        let city_id: CityId = parse_id(city_id, "City")?;
        let ratings = self.repository.list_health(city_id).await?;

        if ratings.is_empty() {
            return Err(ApplicationError::NotFound(
                "No health ratings found for this city".to_string(),
            ));
        }

        let average = average_health_ratings(&ratings);
        Ok(HealthRatingSummary { ratings, average })
    }

    /// Replace all five scores of a health rating
    #[instrument(skip(self, request))]
    pub async fn update_health(
        &self,
        id: &str,
        request: UpdateHealthRatingRequest,
    ) -> ApplicationResult<HealthRating> {
        let id: HealthRatingId = parse_id(id, "Health rating")?;
        request.validate_all().ensure_valid()?;

        let rating = self
            .repository
            .update_health(id, request.into_scores()?)
            .await?
            .ok_or_else(|| ApplicationError::NotFound("Health rating not found".to_string()))?;

        info!(rating_id = %id, "Health rating updated");
        Ok(rating)
    }

    #[instrument(skip(self))]
    pub async fn delete_health(&self, id: &str) -> ApplicationResult<HealthRating> {
        let id: HealthRatingId = parse_id(id, "Health rating")?;
        let rating = self
            .repository
            .delete_health(id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound("Health rating not found".to_string()))?;

        info!(rating_id = %id, "Health rating deleted");
        Ok(rating)
    }
}
