//! Emergency info repository implementation.
//!
//! Emergency info and its ambulance service live in two tables and are
//! always written inside one transaction.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use travel_health_application::{ApplicationError, EmergencyRepositoryPort};
use travel_health_domain::{
    AmbulanceService, AmbulanceServiceId, CityId, EmergencyDetails, EmergencyInfo,
    EmergencyInfoId, EmergencyInfoUpdate,
};

use crate::database::TransactionExt;
use crate::Error;

const DETAILS_SELECT: &str = r#"
    SELECT
        e.id, e.city_id, e.emergency_phone,
        a.id AS ambulance_id, a.available, a.lowest_fees, a.highest_fees, a.response_time
    FROM emergency_infos e
    LEFT JOIN ambulance_services a ON a.emergency_info_id = e.id
"#;

pub(crate) fn details_from_row(row: &PgRow) -> sqlx::Result<EmergencyDetails> {
    let info = EmergencyInfo {
        id: EmergencyInfoId::from(row.try_get::<Uuid, _>("id")?),
        city_id: CityId::from(row.try_get::<Uuid, _>("city_id")?),
        emergency_phone: row.try_get("emergency_phone")?,
    };

    let ambulance_service = match row.try_get::<Option<Uuid>, _>("ambulance_id")? {
        Some(ambulance_id) => Some(AmbulanceService {
            id: AmbulanceServiceId::from(ambulance_id),
            emergency_info_id: info.id,
            available: row.try_get("available")?,
            lowest_fees: row.try_get("lowest_fees")?,
            highest_fees: row.try_get("highest_fees")?,
            response_time: row.try_get("response_time")?,
        }),
        None => None,
    };

    Ok(EmergencyDetails {
        info,
        ambulance_service,
    })
}

/// Emergency details of any of `city_ids`
pub(crate) async fn details_for_cities(
    pool: &PgPool,
    city_ids: &[Uuid],
) -> crate::Result<Vec<EmergencyDetails>> {
    let rows = sqlx::query(&format!("{DETAILS_SELECT} WHERE e.city_id = ANY($1)"))
        .bind(city_ids)
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(details_from_row).collect::<sqlx::Result<_>>()?)
}

/// PostgreSQL implementation of [`EmergencyRepositoryPort`].
pub struct PgEmergencyRepository {
    pool: PgPool,
}

impl PgEmergencyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn upsert_ambulance(conn: &mut PgConnection, ambulance: &AmbulanceService) -> crate::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO ambulance_services (
                id, emergency_info_id, available, lowest_fees, highest_fees, response_time
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (emergency_info_id) DO UPDATE SET
                available = EXCLUDED.available,
                lowest_fees = EXCLUDED.lowest_fees,
                highest_fees = EXCLUDED.highest_fees,
                response_time = EXCLUDED.response_time
            "#,
        )
        .bind(ambulance.id.as_uuid())
        .bind(ambulance.emergency_info_id.as_uuid())
        .bind(ambulance.available)
        .bind(ambulance.lowest_fees)
        .bind(ambulance.highest_fees)
        .bind(&ambulance.response_time)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn insert_on(conn: &mut PgConnection, details: &EmergencyDetails) -> crate::Result<()> {
        sqlx::query("INSERT INTO emergency_infos (id, city_id, emergency_phone) VALUES ($1, $2, $3)")
            .bind(details.info.id.as_uuid())
            .bind(details.info.city_id.as_uuid())
            .bind(&details.info.emergency_phone)
            .execute(&mut *conn)
            .await?;

        if let Some(ambulance) = &details.ambulance_service {
            Self::upsert_ambulance(conn, ambulance).await?;
        }
        Ok(())
    }

    async fn fetch_on(conn: &mut PgConnection, id: EmergencyInfoId) -> crate::Result<Option<EmergencyDetails>> {
        let row = sqlx::query(&format!("{DETAILS_SELECT} WHERE e.id = $1 FOR UPDATE OF e"))
            .bind(id.as_uuid())
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row.as_ref().map(details_from_row).transpose()?)
    }

    /// Read, apply and write back under a row lock
    async fn update_on(
        conn: &mut PgConnection,
        id: EmergencyInfoId,
        update: &EmergencyInfoUpdate,
    ) -> crate::Result<Option<EmergencyDetails>> {
        let Some(mut details) = Self::fetch_on(conn, id).await? else {
            return Ok(None);
        };
        update.clone().apply_to(&mut details);

        sqlx::query("UPDATE emergency_infos SET emergency_phone = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(&details.info.emergency_phone)
            .execute(&mut *conn)
            .await?;

        if update.ambulance_service.is_some() {
            if let Some(ambulance) = &details.ambulance_service {
                Self::upsert_ambulance(conn, ambulance).await?;
            }
        }
        Ok(Some(details))
    }

    async fn delete_on(conn: &mut PgConnection, id: EmergencyInfoId) -> crate::Result<bool> {
        sqlx::query("DELETE FROM ambulance_services WHERE emergency_info_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *conn)
            .await?;

        let deleted = sqlx::query("DELETE FROM emergency_infos WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *conn)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }
}

#[async_trait]
impl EmergencyRepositoryPort for PgEmergencyRepository {
    #[instrument(skip(self, details), fields(city_id = %details.info.city_id))]
    async fn create(&self, details: &EmergencyDetails) -> Result<(), ApplicationError> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let result = Self::insert_on(&mut tx, details).await;
        tx.commit_or_rollback(result).await?;

        debug!(emergency_info_id = %details.info.id, "Emergency info inserted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_by_city(&self, city_id: CityId) -> Result<Option<EmergencyDetails>, ApplicationError> {
        Ok(details_for_cities(&self.pool, &[city_id.into_uuid()])
            .await?
            .into_iter()
            .next())
    }

    #[instrument(skip(self, update))]
    async fn update(
        &self,
        id: EmergencyInfoId,
        update: &EmergencyInfoUpdate,
    ) -> Result<Option<EmergencyDetails>, ApplicationError> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let result = Self::update_on(&mut tx, id, update).await;
        Ok(tx.commit_or_rollback(result).await?)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EmergencyInfoId) -> Result<bool, ApplicationError> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let result = Self::delete_on(&mut tx, id).await;
        let deleted = tx.commit_or_rollback(result).await?;

        if deleted {
            info!(emergency_info_id = %id, "Emergency info removed");
        }
        Ok(deleted)
    }
}
