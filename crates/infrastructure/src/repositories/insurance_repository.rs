//! Insurance info repository implementation.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use travel_health_application::{ApplicationError, InsuranceRepositoryPort};
use travel_health_domain::{CityId, InsuranceDraft, InsuranceInfo, InsuranceInfoId};

use crate::Error;

type Result<T> = std::result::Result<T, ApplicationError>;

const COLUMNS: &str = "id, city_id, international_accepted, travel_insurance_recommended";

pub(crate) fn insurance_from_row(row: &PgRow) -> sqlx::Result<InsuranceInfo> {
    Ok(InsuranceInfo {
        id: InsuranceInfoId::from(row.try_get::<Uuid, _>("id")?),
        city_id: CityId::from(row.try_get::<Uuid, _>("city_id")?),
        international_accepted: row.try_get("international_accepted")?,
        travel_insurance_recommended: row.try_get("travel_insurance_recommended")?,
    })
}

/// Insurance info of any of `city_ids`
pub(crate) async fn insurance_for_cities(
    pool: &PgPool,
    city_ids: &[Uuid],
) -> crate::Result<Vec<InsuranceInfo>> {
    let rows = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM insurance_infos WHERE city_id = ANY($1)"
    ))
    .bind(city_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(insurance_from_row).collect::<sqlx::Result<_>>()?)
}

/// PostgreSQL implementation of [`InsuranceRepositoryPort`].
pub struct PgInsuranceRepository {
    pool: PgPool,
}

impl PgInsuranceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InsuranceRepositoryPort for PgInsuranceRepository {
    #[instrument(skip(self, info), fields(city_id = %info.city_id))]
    async fn create(&self, info: &InsuranceInfo) -> Result<()> {
        sqlx::query(&format!("INSERT INTO insurance_infos ({COLUMNS}) VALUES ($1, $2, $3, $4)"))
            .bind(info.id.as_uuid())
            .bind(info.city_id.as_uuid())
            .bind(info.international_accepted)
            .bind(info.travel_insurance_recommended)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(insurance_info_id = %info.id, "Insurance info inserted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_by_city(&self, city_id: CityId) -> Result<Option<InsuranceInfo>> {
        Ok(insurance_for_cities(&self.pool, &[city_id.into_uuid()])
            .await?
            .into_iter()
            .next())
    }

    #[instrument(skip(self))]
    async fn update(&self, id: InsuranceInfoId, draft: InsuranceDraft) -> Result<Option<InsuranceInfo>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE insurance_infos
            SET international_accepted = $2, travel_insurance_recommended = $3
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id.as_uuid())
        .bind(draft.international_accepted)
        .bind(draft.travel_insurance_recommended)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row
            .as_ref()
            .map(insurance_from_row)
            .transpose()
            .map_err(Error::Database)?)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: InsuranceInfoId) -> Result<Option<InsuranceInfo>> {
        let row = sqlx::query(&format!("DELETE FROM insurance_infos WHERE id = $1 RETURNING {COLUMNS}"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row
            .as_ref()
            .map(insurance_from_row)
            .transpose()
            .map_err(Error::Database)?)
    }
}
