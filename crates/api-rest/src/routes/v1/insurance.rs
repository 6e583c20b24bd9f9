//! Insurance info endpoints.

use crate::{
    error::ApiResult,
    extractors::ApiJson,
    responses::{ApiResponse, Created},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Router,
};
use travel_health_application::validation::{CreateInsuranceRequest, UpdateInsuranceRequest};
use travel_health_domain::InsuranceInfo;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/insurance", post(create_insurance))
        .route("/insurance/city/:city_id", get(get_for_city))
        .route("/insurance/:id", put(update_insurance).delete(delete_insurance))
}

async fn create_insurance(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateInsuranceRequest>,
) -> ApiResult<Created<InsuranceInfo>> {
    let info = state.services.insurance.create(request).await?;
    Ok(Created::with_message(info, "Insurance info created"))
}

async fn get_for_city(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
) -> ApiResult<ApiResponse<InsuranceInfo>> {
    let info = state.services.insurance.get_by_city(&city_id).await?;
    Ok(ApiResponse::success(info))
}

async fn update_insurance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateInsuranceRequest>,
) -> ApiResult<ApiResponse<InsuranceInfo>> {
    let info = state.services.insurance.update(&id, request).await?;
    Ok(ApiResponse::success_with_message(info, "Insurance info updated"))
}

async fn delete_insurance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<InsuranceInfo>> {
    let info = state.services.insurance.delete(&id).await?;
    Ok(ApiResponse::success_with_message(info, "Insurance info deleted"))
}
