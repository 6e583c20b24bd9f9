//! Emergency info endpoints.

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
use travel_health_application::validation::{CreateEmergencyRequest, UpdateEmergencyRequest};
use travel_health_domain::EmergencyDetails;

/// Emergency info routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/emergency", post(create_emergency))
        .route("/emergency/city/:city_id", get(get_for_city))
        .route("/emergency/:id", put(update_emergency).delete(delete_emergency))
}

/// Create emergency info, with its ambulance service when given
async fn create_emergency(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateEmergencyRequest>,
) -> ApiResult<Created<EmergencyDetails>> {
    let details = state.services.emergency.create(request).await?;
    Ok(Created::with_message(details, "Emergency info created"))
}

async fn get_for_city(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
) -> ApiResult<ApiResponse<EmergencyDetails>> {
    let details = state.services.emergency.get_by_city(&city_id).await?;
    Ok(ApiResponse::success(details))
}

async fn update_emergency(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateEmergencyRequest>,
) -> ApiResult<ApiResponse<EmergencyDetails>> {
    let details = state.services.emergency.update(&id, request).await?;
    Ok(ApiResponse::success_with_message(details, "Emergency info updated"))
}

async fn delete_emergency(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    state.services.emergency.delete(&id).await?;
    Ok(ApiResponse::message("Emergency info deleted"))
}
