//! General and health rating endpoints.

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
use travel_health_application::{
    services::{GeneralRatingSummary, HealthRatingSummary},
    validation::{
        CreateGeneralRatingRequest, CreateHealthRatingRequest, HealthScoresInput,
        UpdateGeneralRatingRequest,
    },
};
use travel_health_domain::{GeneralRating, HealthRating};

/// Rating routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/general-ratings", post(create_general))
        .route("/general-ratings/city/:city_id", get(general_for_city))
        .route(
            "/general-ratings/:id",
            put(update_general).delete(delete_general),
        )
        .route("/health-ratings", post(create_health))
        .route("/health-ratings/city/:city_id", get(health_for_city))
        .route("/health-ratings/:id", put(update_health).delete(delete_health))
}

// ============================================================================
// General ratings
// ============================================================================

async fn create_general(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateGeneralRatingRequest>,
) -> ApiResult<Created<GeneralRating>> {
    let rating = state.services.ratings.create_general(request).await?;
    Ok(Created::with_message(rating, "General rating created"))
}

async fn general_for_city(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
) -> ApiResult<ApiResponse<GeneralRatingSummary>> {
    let summary = state.services.ratings.general_for_city(&city_id).await?;
    Ok(ApiResponse::success(summary))
}

async fn update_general(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateGeneralRatingRequest>,
) -> ApiResult<ApiResponse<GeneralRating>> {
    let rating = state.services.ratings.update_general(&id, request).await?;
    Ok(ApiResponse::success_with_message(rating, "General rating updated"))
}

async fn delete_general(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<GeneralRating>> {
    let rating = state.services.ratings.delete_general(&id).await?;
    Ok(ApiResponse::success_with_message(rating, "General rating deleted"))
}

// ============================================================================
// Health ratings
// ============================================================================

async fn create_health(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateHealthRatingRequest>,
) -> ApiResult<Created<HealthRating>> {
    let rating = state.services.ratings.create_health(request).await?;
    Ok(Created::with_message(rating, "Health rating created"))
}

async fn health_for_city(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
) -> ApiResult<ApiResponse<HealthRatingSummary>> {
    let summary = state.services.ratings.health_for_city(&city_id).await?;
    Ok(ApiResponse::success(summary))
}

/// Replace all five scores of a health rating
async fn update_health(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(scores): ApiJson<HealthScoresInput>,
) -> ApiResult<ApiResponse<HealthRating>> {
    let rating = state.services.ratings.update_health(&id, scores).await?;
    Ok(ApiResponse::success_with_message(rating, "Health rating updated"))
}

async fn delete_health(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<HealthRating>> {
    let rating = state.services.ratings.delete_health(&id).await?;
    Ok(ApiResponse::success_with_message(rating, "Health rating deleted"))
}
