//! Emergency Service
//!
//! Emergency information and its ambulance service are always written
//! together inside one transaction.

use crate::validation::{parse_id, CreateEmergencyRequest, UpdateEmergencyRequest, Validatable};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use std::sync::Arc;
use travel_health_domain::{CityId, EmergencyDetails, EmergencyInfoId, EmergencyInfoUpdate};
use tracing::{info, instrument};

/// Emergency repository trait (to be implemented by infrastructure)
#[async_trait]
pub trait EmergencyRepositoryPort: Send + Sync {
    /// Insert the emergency info and, when present, its ambulance service.
    async fn create(&self, details: &EmergencyDetails) -> Result<(), ApplicationError>;

    async fn get_by_city(
        &self,
        city_id: CityId,
    ) -> Result<Option<EmergencyDetails>, ApplicationError>;

    /// Apply `update` in one transaction, inserting the ambulance service
    /// when the record has none. `None` when the record does not exist.
    async fn update(
        &self,
        id: EmergencyInfoId,
        update: &EmergencyInfoUpdate,
    ) -> Result<Option<EmergencyDetails>, ApplicationError>;

    /// Delete the ambulance service and the emergency info in one
    /// transaction. Returns false when the record does not exist.
    async fn delete(&self, id: EmergencyInfoId) -> Result<bool, ApplicationError>;
}

pub struct EmergencyService {
    repository: Arc<dyn EmergencyRepositoryPort>,
}

impl EmergencyService {
    pub fn new(repository: Arc<dyn EmergencyRepositoryPort>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, request))]
    pub async fn create(&self, request: CreateEmergencyRequest) -> ApplicationResult<EmergencyDetails> {
        request.validate_all().ensure_valid()?;
        let draft = request.into_draft()?;

        if self.repository.get_by_city(draft.city_id).await?.is_some() {
            return Err(ApplicationError::ValidationFailed(
                "cityId: city already has emergency information".to_string(),
            ));
        }

        let details = draft.into_details();
        self.repository.create(&details).await?;

        info!(
            city_id = %details.info.city_id,
            emergency_info_id = %details.info.id,
            with_ambulance = details.ambulance_service.is_some(),
            "Emergency info created"
        );
        Ok(details)
    }

    #[instrument(skip(self))]
    pub async fn get_by_city(&self, city_id: &str) -> ApplicationResult<EmergencyDetails> {
        let city_id: CityId = parse_id(city_id, "City")?;
        self.repository
            .get_by_city(city_id)
            .await?
            .ok_or_else(emergency_not_found)
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: &str,
        request: UpdateEmergencyRequest,
    ) -> ApplicationResult<EmergencyDetails> {
        let id: EmergencyInfoId = parse_id(id, "EmergencyInfo")?;
        request.validate_all().ensure_valid()?;
        let update = request.into_update()?;

        let details = self
            .repository
            .update(id, &update)
            .await?
            .ok_or_else(emergency_not_found)?;

        info!(emergency_info_id = %id, "Emergency info updated");
        Ok(details)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> ApplicationResult<()> {
        let id: EmergencyInfoId = parse_id(id, "EmergencyInfo")?;
        if !self.repository.delete(id).await? {
            return Err(emergency_not_found());
        }

        info!(emergency_info_id = %id, "Emergency info deleted");
        Ok(())
    }
}

fn emergency_not_found() -> ApplicationError {
    ApplicationError::NotFound("EmergencyInfo not found".to_string())
}
