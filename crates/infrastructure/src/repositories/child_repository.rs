//! Child collection repository implementation.
//!
//! One generic PostgreSQL repository serves hospitals, vaccines and common
//! illnesses. Each table describes its columns through [`ChildTable`].

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::query_builder::Separated;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder, Row};
use std::marker::PhantomData;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use travel_health_application::{ApplicationError, ChildRepositoryPort};
use travel_health_domain::{
    CityChild, CityId, CommonIllness, Hospital, HospitalId, IllnessId, Vaccine, VaccineId,
};

use crate::database::TransactionExt;
use crate::{Error, Result};

/// Mapping between a child type and its table
pub trait ChildTable: CityChild {
    const TABLE: &'static str;

    /// Data columns, in bind order, after `id` and `city_id`
    const COLUMNS: &'static [&'static str];

    fn key(id: Self::Id) -> Uuid;

    fn from_row(row: &PgRow) -> sqlx::Result<Self>;

    /// Bind the data columns in `COLUMNS` order.
    fn bind_columns(&self, row: &mut Separated<'_, 'static, Postgres, &'static str>);
}

impl ChildTable for Hospital {
    const TABLE: &'static str = "hospitals";
    const COLUMNS: &'static [&'static str] = &["name", "address", "contact", "open_24_hours"];

    fn key(id: HospitalId) -> Uuid {
        id.into_uuid()
    }

    fn from_row(row: &PgRow) -> sqlx::Result<Self> {
        Ok(Hospital {
            id: HospitalId::from(row.try_get::<Uuid, _>("id")?),
            city_id: CityId::from(row.try_get::<Uuid, _>("city_id")?),
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            contact: row.try_get("contact")?,
            open_24_hours: row.try_get("open_24_hours")?,
        })
    }

    fn bind_columns(&self, row: &mut Separated<'_, 'static, Postgres, &'static str>) {
        row.push_bind(self.name.clone())
            .push_bind(self.address.clone())
            .push_bind(self.contact.clone())
            .push_bind(self.open_24_hours);
    }
}

impl ChildTable for Vaccine {
    const TABLE: &'static str = "vaccines";
    const COLUMNS: &'static [&'static str] = &["vaccine", "importance"];

    fn key(id: VaccineId) -> Uuid {
        id.into_uuid()
    }

    fn from_row(row: &PgRow) -> sqlx::Result<Self> {
        Ok(Vaccine {
            id: VaccineId::from(row.try_get::<Uuid, _>("id")?),
            city_id: CityId::from(row.try_get::<Uuid, _>("city_id")?),
            vaccine: row.try_get("vaccine")?,
            importance: row.try_get("importance")?,
        })
    }

    fn bind_columns(&self, row: &mut Separated<'_, 'static, Postgres, &'static str>) {
        row.push_bind(self.vaccine.clone()).push_bind(self.importance);
    }
}

impl ChildTable for CommonIllness {
    const TABLE: &'static str = "common_illnesses";
    const COLUMNS: &'static [&'static str] = &["illness"];

    fn key(id: IllnessId) -> Uuid {
        id.into_uuid()
    }

    fn from_row(row: &PgRow) -> sqlx::Result<Self> {
        Ok(CommonIllness {
            id: IllnessId::from(row.try_get::<Uuid, _>("id")?),
            city_id: CityId::from(row.try_get::<Uuid, _>("city_id")?),
            illness: row.try_get("illness")?,
        })
    }

    fn bind_columns(&self, row: &mut Separated<'_, 'static, Postgres, &'static str>) {
        row.push_bind(self.illness.clone());
    }
}

/// PostgreSQL implementation of [`ChildRepositoryPort`] for any [`ChildTable`].
pub struct PgChildRepository<C> {
    pool: PgPool,
    _child: PhantomData<fn() -> C>,
}

impl<C: ChildTable> PgChildRepository<C> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _child: PhantomData,
        }
    }

    fn select_sql(filter: &str) -> String {
        format!(
            "SELECT id, city_id, {} FROM {} WHERE {} ORDER BY created_at, id",
            C::COLUMNS.join(", "),
            C::TABLE,
            filter
        )
    }

    fn delete_returning_sql() -> String {
        format!(
            "DELETE FROM {} WHERE id = $1 RETURNING id, city_id, {}",
            C::TABLE,
            C::COLUMNS.join(", ")
        )
    }

    /// Multi-row insert on an open connection
    async fn insert_all(conn: &mut PgConnection, children: &[C]) -> Result<u64> {
        if children.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<'static, Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} (id, city_id, {}) ",
            C::TABLE,
            C::COLUMNS.join(", ")
        ));
        builder.push_values(children, |mut row, child| {
            row.push_bind(C::key(child.id()))
                .push_bind(child.city_id().into_uuid());
            child.bind_columns(&mut row);
        });

        let result = builder.build().execute(&mut *conn).await?;
        Ok(result.rows_affected())
    }

    /// Delete then insert. Locks the city row first so concurrent replaces
    /// (and inserts) for the same city run one after another.
    async fn replace_on(conn: &mut PgConnection, city_id: CityId, children: &[C]) -> Result<u64> {
        let locked = sqlx::query("SELECT id FROM cities WHERE id = $1 FOR UPDATE")
            .bind(city_id.as_uuid())
            .fetch_optional(&mut *conn)
            .await?;
        if locked.is_none() {
            return Err(Error::CityNotFound);
        }

        let deleted = sqlx::query(&format!("DELETE FROM {} WHERE city_id = $1", C::TABLE))
            .bind(city_id.as_uuid())
            .execute(&mut *conn)
            .await?
            .rows_affected();
        debug!(city_id = %city_id, deleted, "Removed previous {}", C::PLURAL);

        Self::insert_all(conn, children).await
    }
}

#[async_trait]
impl<C: ChildTable> ChildRepositoryPort<C> for PgChildRepository<C> {
    #[instrument(skip(self, child), fields(table = C::TABLE))]
    async fn create(&self, child: &C) -> std::result::Result<(), ApplicationError> {
        let mut conn = self.pool.acquire().await.map_err(Error::Database)?;
        Self::insert_all(&mut conn, std::slice::from_ref(child)).await?;
        debug!(id = %child.id(), "{} inserted", C::NAME);
        Ok(())
    }

    #[instrument(skip(self, children), fields(table = C::TABLE, count = children.len()))]
    async fn create_many(&self, children: &[C]) -> std::result::Result<u64, ApplicationError> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let result = Self::insert_all(&mut tx, children).await;
        Ok(tx.commit_or_rollback(result).await?)
    }

    #[instrument(skip(self), fields(table = C::TABLE))]
    async fn get_by_id(&self, id: C::Id) -> std::result::Result<Option<C>, ApplicationError> {
        let row = sqlx::query(&Self::select_sql("id = $1"))
            .bind(C::key(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row
            .map(|row| C::from_row(&row))
            .transpose()
            .map_err(Error::Database)?)
    }

    #[instrument(skip(self), fields(table = C::TABLE))]
    async fn list_by_city(&self, city_id: CityId) -> std::result::Result<Vec<C>, ApplicationError> {
        let rows = sqlx::query(&Self::select_sql("city_id = $1"))
            .bind(city_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(rows
            .iter()
            .map(C::from_row)
            .collect::<sqlx::Result<Vec<_>>>()
            .map_err(Error::Database)?)
    }

    #[instrument(skip(self), fields(table = C::TABLE))]
    async fn delete(&self, id: C::Id) -> std::result::Result<Option<C>, ApplicationError> {
        let row = sqlx::query(&Self::delete_returning_sql())
            .bind(C::key(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row
            .map(|row| C::from_row(&row))
            .transpose()
            .map_err(Error::Database)?)
    }

    #[instrument(skip(self, ids), fields(table = C::TABLE, requested = ids.len()))]
    async fn delete_many(&self, ids: &[C::Id]) -> std::result::Result<u64, ApplicationError> {
        let keys: Vec<Uuid> = ids.iter().copied().map(C::key).collect();
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ANY($1)", C::TABLE))
            .bind(keys)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self, children), fields(table = C::TABLE, count = children.len()))]
    async fn replace_for_city(
        &self,
        city_id: CityId,
        children: &[C],
    ) -> std::result::Result<(), ApplicationError> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let result = Self::replace_on(&mut tx, city_id, children).await;
        let inserted = tx.commit_or_rollback(result).await?;

        info!(city_id = %city_id, inserted, "{} replaced", C::PLURAL);
        Ok(())
    }
}

/// Rows of `C` belonging to any of `city_ids`
pub(crate) async fn fetch_for_cities<C: ChildTable>(
    pool: &PgPool,
    city_ids: &[Uuid],
) -> Result<Vec<C>> {
    let rows = sqlx::query(&PgChildRepository::<C>::select_sql("city_id = ANY($1)"))
        .bind(city_ids)
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(C::from_row).collect::<sqlx::Result<Vec<_>>>()?)
}
