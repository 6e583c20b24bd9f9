//! City repository implementation.
//!
//! Aggregates are assembled from one query per table, keyed by city id,
//! instead of one round trip per city.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use tracing::{debug, instrument};
use uuid::Uuid;

use travel_health_application::{ApplicationError, CityRepositoryPort};
use travel_health_domain::{
    City, CityAggregate, CityId, CommonIllness, GeneralRating, Hospital, Vaccine,
};

use super::child_repository::fetch_for_cities;
use super::emergency_repository::details_for_cities;
use super::insurance_repository::insurance_for_cities;
use super::rating_repository::{general_for_cities, health_for_cities};
use crate::database::TransactionExt;
use crate::Error;

type Result<T> = std::result::Result<T, ApplicationError>;

const COLUMNS: &str = "id, name, country, overview, description, image_url";

fn city_from_row(row: &PgRow) -> sqlx::Result<City> {
    Ok(City {
        id: CityId::from(row.try_get::<Uuid, _>("id")?),
        name: row.try_get("name")?,
        country: row.try_get("country")?,
        overview: row.try_get("overview")?,
        description: row.try_get("description")?,
        image_url: row.try_get("image_url")?,
    })
}

/// Group `rows` by city, keeping their order
fn group_by_city<T>(rows: Vec<T>, key: impl Fn(&T) -> CityId) -> HashMap<CityId, Vec<T>> {
    let mut grouped: HashMap<CityId, Vec<T>> = HashMap::new();
    for row in rows {
        grouped.entry(key(&row)).or_default().push(row);
    }
    grouped
}

/// PostgreSQL implementation of [`CityRepositoryPort`].
pub struct PgCityRepository {
    pool: PgPool,
}

impl PgCityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_cities(&self, filter: &str, id: Option<CityId>) -> crate::Result<Vec<City>> {
        let sql = format!("SELECT {COLUMNS} FROM cities {filter} ORDER BY created_at, id");
        let mut query = sqlx::query(&sql);
        if let Some(id) = id {
            query = query.bind(id.into_uuid());
        }
        let rows = query.fetch_all(&self.pool).await?;

        Ok(rows.iter().map(city_from_row).collect::<sqlx::Result<_>>()?)
    }

    async fn assemble(&self, cities: Vec<City>) -> crate::Result<Vec<CityAggregate>> {
        if cities.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = cities.iter().map(|city| city.id.into_uuid()).collect();

        let mut general = group_by_city(general_for_cities(&self.pool, &ids).await?, |r| r.city_id);
        let mut health = group_by_city(health_for_cities(&self.pool, &ids).await?, |r| r.city_id);
        let mut hospitals =
            group_by_city(fetch_for_cities::<Hospital>(&self.pool, &ids).await?, |h| h.city_id);
        let mut vaccines =
            group_by_city(fetch_for_cities::<Vaccine>(&self.pool, &ids).await?, |v| v.city_id);
        let mut illnesses = group_by_city(
            fetch_for_cities::<CommonIllness>(&self.pool, &ids).await?,
            |i| i.city_id,
        );
        let mut emergency: HashMap<CityId, _> = details_for_cities(&self.pool, &ids)
            .await?
            .into_iter()
            .map(|details| (details.info.city_id, details))
            .collect();
        let mut insurance: HashMap<CityId, _> = insurance_for_cities(&self.pool, &ids)
            .await?
            .into_iter()
            .map(|info| (info.city_id, info))
            .collect();

        Ok(cities
            .into_iter()
            .map(|city| {
                let id = city.id;
                CityAggregate {
                    city,
                    general_ratings: general.remove(&id).unwrap_or_default(),
                    health_ratings: health.remove(&id).unwrap_or_default(),
                    hospitals: hospitals.remove(&id).unwrap_or_default(),
                    vaccines: vaccines.remove(&id).unwrap_or_default(),
                    common_illnesses: illnesses.remove(&id).unwrap_or_default(),
                    emergency_info: emergency.remove(&id),
                    insurance_info: insurance.remove(&id),
                }
            })
            .collect())
    }

    async fn insert_on(
        conn: &mut sqlx::PgConnection,
        city: &City,
        rating: &GeneralRating,
    ) -> crate::Result<()> {
        sqlx::query(&format!("INSERT INTO cities ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6)"))
            .bind(city.id.as_uuid())
            .bind(&city.name)
            .bind(&city.country)
            .bind(&city.overview)
            .bind(&city.description)
            .bind(&city.image_url)
            .execute(&mut *conn)
            .await?;

        sqlx::query("INSERT INTO general_ratings (id, city_id, rating) VALUES ($1, $2, $3)")
            .bind(rating.id.as_uuid())
            .bind(city.id.as_uuid())
            .bind(rating.rating)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn update_column(
        &self,
        column: &str,
        id: CityId,
        value: Option<&str>,
    ) -> crate::Result<Option<City>> {
        let row = sqlx::query(&format!(
            "UPDATE cities SET {column} = $2 WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(city_from_row).transpose()?)
    }
}

#[async_trait]
impl CityRepositoryPort for PgCityRepository {
    #[instrument(skip(self, city, rating), fields(city_id = %city.id))]
    async fn create_with_rating(&self, city: &City, rating: &GeneralRating) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let result = Self::insert_on(&mut tx, city, rating).await;
        tx.commit_or_rollback(result).await?;

        debug!("City and initial rating inserted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, id: CityId) -> Result<Option<City>> {
        Ok(self
            .fetch_cities("WHERE id = $1", Some(id))
            .await?
            .into_iter()
            .next())
    }

    #[instrument(skip(self))]
    async fn list_aggregates(&self) -> Result<Vec<CityAggregate>> {
        let cities = self.fetch_cities("", None).await?;
        Ok(self.assemble(cities).await?)
    }

    #[instrument(skip(self))]
    async fn get_aggregate(&self, id: CityId) -> Result<Option<CityAggregate>> {
        let cities = self.fetch_cities("WHERE id = $1", Some(id)).await?;
        Ok(self.assemble(cities).await?.into_iter().next())
    }

    #[instrument(skip(self))]
    async fn list_with_general_ratings(&self) -> Result<Vec<(City, Vec<GeneralRating>)>> {
        let cities = self.fetch_cities("", None).await?;
        let ids: Vec<Uuid> = cities.iter().map(|city| city.id.into_uuid()).collect();
        let mut ratings = group_by_city(general_for_cities(&self.pool, &ids).await?, |r| r.city_id);

        Ok(cities
            .into_iter()
            .map(|city| {
                let city_ratings = ratings.remove(&city.id).unwrap_or_default();
                (city, city_ratings)
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn set_image_url(&self, id: CityId, image_url: &str) -> Result<Option<City>> {
        Ok(self.update_column("image_url", id, Some(image_url)).await?)
    }

    #[instrument(skip(self, description))]
    async fn set_description(&self, id: CityId, description: Option<&str>) -> Result<Option<City>> {
        Ok(self.update_column("description", id, description).await?)
    }
}
