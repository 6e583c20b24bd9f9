//! Rating repository implementation.
//!
//! PostgreSQL-backed storage for general and health ratings.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use travel_health_application::{ApplicationError, RatingRepositoryPort};
use travel_health_domain::{
    CityId, GeneralRating, GeneralRatingId, HealthRating, HealthRatingId, HealthScores,
};

use crate::Error;

type Result<T> = std::result::Result<T, ApplicationError>;

const GENERAL_COLUMNS: &str = "id, city_id, rating";
const HEALTH_COLUMNS: &str =
    "id, city_id, language_support, water_safety, food_safety, health_risk, air_quality";

pub(crate) fn general_from_row(row: &PgRow) -> sqlx::Result<GeneralRating> {
    Ok(GeneralRating {
        id: GeneralRatingId::from(row.try_get::<Uuid, _>("id")?),
        city_id: CityId::from(row.try_get::<Uuid, _>("city_id")?),
        rating: row.try_get("rating")?,
    })
}

pub(crate) fn health_from_row(row: &PgRow) -> sqlx::Result<HealthRating> {
    Ok(HealthRating {
        id: HealthRatingId::from(row.try_get::<Uuid, _>("id")?),
        city_id: CityId::from(row.try_get::<Uuid, _>("city_id")?),
        scores: HealthScores {
            language_support: row.try_get("language_support")?,
            water_safety: row.try_get("water_safety")?,
            food_safety: row.try_get("food_safety")?,
            health_risk: row.try_get("health_risk")?,
            air_quality: row.try_get("air_quality")?,
        },
    })
}

/// General ratings of any of `city_ids`
pub(crate) async fn general_for_cities(
    pool: &PgPool,
    city_ids: &[Uuid],
) -> crate::Result<Vec<GeneralRating>> {
    let rows = sqlx::query(&format!(
        "SELECT {GENERAL_COLUMNS} FROM general_ratings WHERE city_id = ANY($1) ORDER BY created_at, id"
    ))
    .bind(city_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(general_from_row).collect::<sqlx::Result<_>>()?)
}

/// Health ratings of any of `city_ids`
pub(crate) async fn health_for_cities(
    pool: &PgPool,
    city_ids: &[Uuid],
) -> crate::Result<Vec<HealthRating>> {
    let rows = sqlx::query(&format!(
        "SELECT {HEALTH_COLUMNS} FROM health_ratings WHERE city_id = ANY($1) ORDER BY created_at, id"
    ))
    .bind(city_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(health_from_row).collect::<sqlx::Result<_>>()?)
}

/// PostgreSQL implementation of [`RatingRepositoryPort`].
pub struct PgRatingRepository {
    pool: PgPool,
}

impl PgRatingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepositoryPort for PgRatingRepository {
    #[instrument(skip(self, rating), fields(city_id = %rating.city_id))]
    async fn create_general(&self, rating: &GeneralRating) -> Result<()> {
        sqlx::query("INSERT INTO general_ratings (id, city_id, rating) VALUES ($1, $2, $3)")
            .bind(rating.id.as_uuid())
            .bind(rating.city_id.as_uuid())
            .bind(rating.rating)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(rating_id = %rating.id, "General rating inserted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_general(&self, city_id: CityId) -> Result<Vec<GeneralRating>> {
        Ok(general_for_cities(&self.pool, &[city_id.into_uuid()]).await?)
    }

    #[instrument(skip(self))]
    async fn update_general(&self, id: GeneralRatingId, rating: f64) -> Result<Option<GeneralRating>> {
        let row = sqlx::query(&format!(
            "UPDATE general_ratings SET rating = $2 WHERE id = $1 RETURNING {GENERAL_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(rating)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row
            .as_ref()
            .map(general_from_row)
            .transpose()
            .map_err(Error::Database)?)
    }

    #[instrument(skip(self))]
    async fn delete_general(&self, id: GeneralRatingId) -> Result<Option<GeneralRating>> {
        let row = sqlx::query(&format!(
            "DELETE FROM general_ratings WHERE id = $1 RETURNING {GENERAL_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row
            .as_ref()
            .map(general_from_row)
            .transpose()
            .map_err(Error::Database)?)
    }

    #[instrument(skip(self, rating), fields(city_id = %rating.city_id))]
    async fn create_health(&self, rating: &HealthRating) -> Result<()> {
        let scores = &rating.scores;
        sqlx::query(&format!(
            "INSERT INTO health_ratings ({HEALTH_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7)"
        ))
        .bind(rating.id.as_uuid())
        .bind(rating.city_id.as_uuid())
        .bind(scores.language_support)
        .bind(scores.water_safety)
        .bind(scores.food_safety)
        .bind(scores.health_risk)
        .bind(scores.air_quality)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(rating_id = %rating.id, "Health rating inserted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_health(&self, city_id: CityId) -> Result<Vec<HealthRating>> {
        Ok(health_for_cities(&self.pool, &[city_id.into_uuid()]).await?)
    }

    #[instrument(skip(self, scores))]
    async fn update_health(
        &self,
        id: HealthRatingId,
        scores: HealthScores,
    ) -> Result<Option<HealthRating>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE health_ratings
            SET language_support = $2, water_safety = $3, food_safety = $4,
                health_risk = $5, air_quality = $6
            WHERE id = $1
            RETURNING {HEALTH_COLUMNS}
            "#
        ))
        .bind(id.as_uuid())
        .bind(scores.language_support)
        .bind(scores.water_safety)
        .bind(scores.food_safety)
        .bind(scores.health_risk)
        .bind(scores.air_quality)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row
            .as_ref()
            .map(health_from_row)
            .transpose()
            .map_err(Error::Database)?)
    }

    #[instrument(skip(self))]
    async fn delete_health(&self, id: HealthRatingId) -> Result<Option<HealthRating>> {
        let row = sqlx::query(&format!(
            "DELETE FROM health_ratings WHERE id = $1 RETURNING {HEALTH_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row
            .as_ref()
            .map(health_from_row)
            .transpose()
            .map_err(Error::Database)?)
    }
}
