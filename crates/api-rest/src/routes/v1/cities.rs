//! City endpoints.

use crate::{
    error::ApiResult,
    extractors::ApiJson,
    responses::{ApiResponse, Created},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Router,
};
use travel_health_application::{
    services::CreatedCity,
    validation::{CreateCityRequest, DescriptionRequest, UpdateImageRequest},
};
use travel_health_domain::{City, CityDescription, CityDetail, CityOverview};

/// City routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cities", get(list_cities).post(create_city))
        .route("/cities/overview", get(list_overview))
        .route("/cities/:id", get(get_city))
        .route("/cities/:id/image", put(update_image))
        .route(
            "/cities/:id/description",
            get(get_description)
                .post(add_description)
                .put(update_description)
                .delete(delete_description),
        )
}

/// Every city with its children and rating averages
async fn list_cities(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<CityDetail>>> {
    let cities = state.services.cities.list().await?;
    Ok(ApiResponse::success(cities))
}

async fn list_overview(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<CityOverview>>> {
    let cities = state.services.cities.overview().await?;
    Ok(ApiResponse::success(cities))
}

async fn get_city(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<CityDetail>> {
    let city = state.services.cities.get(&id).await?;
    Ok(ApiResponse::success(city))
}

/// Create a city together with its first general rating
async fn create_city(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateCityRequest>,
) -> ApiResult<Created<CreatedCity>> {
    let city = state.services.cities.create(request).await?;
    Ok(Created::with_message(city, "City created"))
}

async fn update_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateImageRequest>,
) -> ApiResult<ApiResponse<City>> {
    let city = state.services.cities.set_image(&id, request).await?;
    Ok(ApiResponse::success_with_message(city, "City image updated"))
}

async fn get_description(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<CityDescription>> {
    let description = state.services.cities.get_description(&id).await?;
    Ok(ApiResponse::success(description))
}

async fn add_description(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<DescriptionRequest>,
) -> ApiResult<Created<City>> {
    let city = state.services.cities.set_description(&id, request).await?;
    Ok(Created::with_message(city, "City description added"))
}

async fn update_description(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<DescriptionRequest>,
) -> ApiResult<ApiResponse<City>> {
    let city = state.services.cities.set_description(&id, request).await?;
    Ok(ApiResponse::success_with_message(city, "City description updated"))
}

/// Clear the description; the city itself is kept
async fn delete_description(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<City>> {
    let city = state.services.cities.clear_description(&id).await?;
    Ok(ApiResponse::success_with_message(city, "City description deleted"))
}
