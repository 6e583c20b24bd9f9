//! City Child Service
//!
//! Create, read and delete operations for hospitals, vaccines and common
//! illnesses, plus the replace-all updater that swaps a city's whole
//! collection in one transaction.

use crate::validation::{
    into_drafts, parse_id, required, ChildBatchRequest, ChildInput, CreateChildRequest,
    DeleteChildrenRequest, ReplaceChildrenRequest, Validatable,
};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use std::sync::Arc;
use travel_health_domain::{CityChild, CityId};
use tracing::{debug, info, instrument};

/// Repository for one child collection (to be implemented by infrastructure)
#[async_trait]
pub trait ChildRepositoryPort<C: CityChild>: Send + Sync {
    /// Insert one row. A missing parent city is reported as `NotFound`.
    async fn create(&self, child: &C) -> Result<(), ApplicationError>;

    /// Insert every row in one transaction, returning the number inserted.
    async fn create_many(&self, children: &[C]) -> Result<u64, ApplicationError>;

    async fn get_by_id(&self, id: C::Id) -> Result<Option<C>, ApplicationError>;

    async fn list_by_city(&self, city_id: CityId) -> Result<Vec<C>, ApplicationError>;

    /// Delete one row, returning it when it existed.
    async fn delete(&self, id: C::Id) -> Result<Option<C>, ApplicationError>;

    /// Delete every listed row that exists, returning how many were removed.
    async fn delete_many(&self, ids: &[C::Id]) -> Result<u64, ApplicationError>;

    /// Delete all rows of the city and insert `children`, atomically.
    ///
    /// On error nothing changes, and concurrent readers never see the city
    /// without its previous or its new collection.
    async fn replace_for_city(
        &self,
        city_id: CityId,
        children: &[C],
    ) -> Result<(), ApplicationError>;
}

/// Service for one child collection
pub struct CityChildService<C: CityChild> {
    repository: Arc<dyn ChildRepositoryPort<C>>,
}

impl<C: CityChild> CityChildService<C> {
    pub fn new(repository: Arc<dyn ChildRepositoryPort<C>>) -> Self {
        Self { repository }
    }

    /// Create a single row
    #[instrument(skip(self, request), fields(kind = C::PLURAL))]
    pub async fn create<I>(&self, request: CreateChildRequest<I>) -> ApplicationResult<C>
    where
        I: ChildInput<Child = C>,
    {
        request.validate_all().ensure_valid()?;

        let city_id: CityId = parse_id(&required(request.city_id, "cityId")?, "City")?;
        let child = C::from_draft(city_id, request.item.into_draft()?);

        self.repository.create(&child).await?;

        info!(city_id = %city_id, id = %child.id(), "{} created", C::NAME);
        Ok(child)
    }

    /// Create several rows for one city in a single transaction
    #[instrument(skip(self, request), fields(kind = C::PLURAL))]
    pub async fn create_many<I>(&self, request: ChildBatchRequest<I>) -> ApplicationResult<Vec<C>>
    where
        I: ChildInput<Child = C>,
    {
        request.validate_all().ensure_valid()?;

        let city_id: CityId = parse_id(&required(request.city_id, "cityId")?, "City")?;
        let children = self.build(city_id, required(request.items, C::PLURAL)?)?;

        let count = self.repository.create_many(&children).await?;

        info!(city_id = %city_id, count, "{} created", C::PLURAL);
        Ok(children)
    }

    /// Get a row by ID
    #[instrument(skip(self), fields(kind = C::PLURAL))]
    pub async fn get(&self, id: &str) -> ApplicationResult<C> {
        let id: C::Id = parse_id(id, C::NAME)?;
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found::<C>())
    }

    /// All rows of a city. An empty collection is reported as `NotFound`.
    #[instrument(skip(self), fields(kind = C::PLURAL))]
    pub async fn list_by_city(&self, city_id: &str) -> ApplicationResult<Vec<C>> {
        let city_id: CityId = parse_id(city_id, "City")?;
        let children = self.repository.list_by_city(city_id).await?;

        if children.is_empty() {
            return Err(ApplicationError::NotFound(format!(
                "No {} found for the given city",
                C::PLURAL
            )));
        }

        debug!(city_id = %city_id, count = children.len(), "Listed {}", C::PLURAL);
        Ok(children)
    }

    /// Delete a row by ID, returning the removed row
    #[instrument(skip(self), fields(kind = C::PLURAL))]
    pub async fn delete(&self, id: &str) -> ApplicationResult<C> {
        let id: C::Id = parse_id(id, C::NAME)?;
        let deleted = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(|| not_found::<C>())?;

        info!(id = %id, "{} deleted", C::NAME);
        Ok(deleted)
    }

    /// Delete several rows by ID. Fails with `NotFound` when none existed.
    #[instrument(skip(self, request), fields(kind = C::PLURAL))]
    pub async fn delete_many(&self, request: DeleteChildrenRequest) -> ApplicationResult<u64> {
        let ids = request.into_ids::<C>()?;
        let count = self.repository.delete_many(&ids).await?;

        if count == 0 {
            return Err(ApplicationError::NotFound(format!(
                "No {} found to delete",
                C::PLURAL
            )));
        }

        info!(requested = ids.len(), count, "{} deleted", C::PLURAL);
        Ok(count)
    }

    /// Replace a city's entire collection with `request`'s list.
    ///
    /// Every element is validated before storage is touched; any invalid
    /// element fails the whole call with no mutation. The returned rows all
    /// carry new identifiers.
    #[instrument(skip(self, request), fields(kind = C::PLURAL))]
    pub async fn replace_all<I>(
        &self,
        city_id: &str,
        request: ReplaceChildrenRequest<I>,
    ) -> ApplicationResult<Vec<C>>
    where
        I: ChildInput<Child = C>,
    {
        let city_id: CityId = parse_id(city_id, "City")?;
        request.validate_all().ensure_valid()?;

        let children = self.build(city_id, required(request.items, C::PLURAL)?)?;

        self.repository.replace_for_city(city_id, &children).await?;

        info!(city_id = %city_id, count = children.len(), "{} replaced", C::PLURAL);
        Ok(children)
    }

    fn build<I>(&self, city_id: CityId, items: Vec<I>) -> ApplicationResult<Vec<C>>
    where
        I: ChildInput<Child = C>,
    {
        Ok(into_drafts(items)?
            .into_iter()
            .map(|draft| C::from_draft(city_id, draft))
            .collect())
    }
}

fn not_found<C: CityChild>() -> ApplicationError {
    ApplicationError::NotFound(format!("{} not found", C::NAME))
}
