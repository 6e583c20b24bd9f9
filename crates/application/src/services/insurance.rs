//! Insurance Service

use crate::validation::{parse_id, CreateInsuranceRequest, UpdateInsuranceRequest, Validatable};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use std::sync::Arc;
use travel_health_domain::{CityId, InsuranceDraft, InsuranceInfo, InsuranceInfoId};
use tracing::{info, instrument};

/// Insurance repository trait (to be implemented by infrastructure)
#[async_trait]
pub trait InsuranceRepositoryPort: Send + Sync {
    async fn create(&self, info: &InsuranceInfo) -> Result<(), ApplicationError>;

    async fn get_by_city(&self, city_id: CityId)
        -> Result<Option<InsuranceInfo>, ApplicationError>;

    async fn update(
        &self,
        id: InsuranceInfoId,
        draft: InsuranceDraft,
    ) -> Result<Option<InsuranceInfo>, ApplicationError>;

    async fn delete(&self, id: InsuranceInfoId) -> Result<Option<InsuranceInfo>, ApplicationError>;
}

pub struct InsuranceService {
    repository: Arc<dyn InsuranceRepositoryPort>,
}

impl InsuranceService {
    pub fn new(repository: Arc<dyn InsuranceRepositoryPort>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, request))]
    pub async fn create(&self, request: CreateInsuranceRequest) -> ApplicationResult<InsuranceInfo> {
        request.validate_all().ensure_valid()?;
        let (city_id, draft) = request.into_parts()?;

        if self.repository.get_by_city(city_id).await?.is_some() {
            return Err(ApplicationError::ValidationFailed(
                "cityId: city already has insurance information".to_string(),
            ));
        }

        let info = InsuranceInfo::new(city_id, draft);
        self.repository.create(&info).await?;

        info!(city_id = %city_id, insurance_info_id = %info.id, "Insurance info created");
        Ok(info)
    }

    #[instrument(skip(self))]
    pub async fn get_by_city(&self, city_id: &str) -> ApplicationResult<InsuranceInfo> {
        let city_id: CityId = parse_id(city_id, "City")?;
        self.repository
            .get_by_city(city_id)
            .await?
            .ok_or_else(insurance_not_found)
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: &str,
        request: UpdateInsuranceRequest,
    ) -> ApplicationResult<InsuranceInfo> {
        let id: InsuranceInfoId = parse_id(id, "InsuranceInfo")?;
        request.validate_all().ensure_valid()?;

        let info = self
            .repository
            .update(id, request.into_draft()?)
            .await?
            .ok_or_else(insurance_not_found)?;

        info!(insurance_info_id = %id, "Insurance info updated");
        Ok(info)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> ApplicationResult<InsuranceInfo> {
        let id: InsuranceInfoId = parse_id(id, "InsuranceInfo")?;
        let info = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(insurance_not_found)?;

        info!(insurance_info_id = %id, "Insurance info deleted");
        Ok(info)
    }
}

fn insurance_not_found() -> ApplicationError {
    ApplicationError::NotFound("InsuranceInfo not found".to_string())
}
