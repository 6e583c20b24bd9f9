//! Hospital, vaccine and common illness endpoints.
//!
//! The three collections share one route shape, mounted under the
//! collection's plural name (`/hospitals`, `/vaccines`, `/illnesses`).

use crate::{
    error::ApiResult,
    extractors::ApiJson,
    responses::{ApiResponse, Count, Created},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use travel_health_application::{
    validation::{
        ChildBatchRequest, ChildInput, CreateChildRequest, DeleteChildrenRequest,
        ReplaceChildrenRequest,
    },
    ChildServices, CityChildService, Services,
};
use travel_health_domain::CityChild;

/// Routes for the collection `C`, whose elements are sent as `I`
pub fn routes<C, I>() -> Router<AppState>
where
    C: CityChild,
    I: ChildInput<Child = C>,
    Services: ChildServices<C>,
{
    let base = format!("/{}", C::PLURAL);

    Router::new()
        .route(&base, post(create::<C, I>).delete(delete_many::<C>))
        .route(&format!("{base}/batch"), post(create_many::<C, I>))
        .route(
            &format!("{base}/city/:city_id"),
            get(list_by_city::<C>).put(replace_all::<C, I>),
        )
        .route(&format!("{base}/:id"), get(get_one::<C>).delete(delete_one::<C>))
}

fn service<C>(state: &AppState) -> &Arc<CityChildService<C>>
where
    C: CityChild,
    Services: ChildServices<C>,
{
    state.services.child_service()
}

async fn create<C, I>(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateChildRequest<I>>,
) -> ApiResult<Created<C>>
where
    C: CityChild,
    I: ChildInput<Child = C>,
    Services: ChildServices<C>,
{
    let child = service::<C>(&state).create(request).await?;
    Ok(Created::with_message(child, format!("{} created", C::NAME)))
}

/// Insert several rows for one city in one transaction
async fn create_many<C, I>(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ChildBatchRequest<I>>,
) -> ApiResult<Created<Vec<C>>>
where
    C: CityChild,
    I: ChildInput<Child = C>,
    Services: ChildServices<C>,
{
    let children = service::<C>(&state).create_many(request).await?;
    let message = format!("{} {} created", children.len(), C::PLURAL);
    Ok(Created::with_message(children, message))
}

async fn get_one<C>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<C>>
where
    C: CityChild,
    Services: ChildServices<C>,
{
    let child = service::<C>(&state).get(&id).await?;
    Ok(ApiResponse::success(child))
}

async fn list_by_city<C>(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
) -> ApiResult<ApiResponse<Vec<C>>>
where
    C: CityChild,
    Services: ChildServices<C>,
{
    let children = service::<C>(&state).list_by_city(&city_id).await?;
    Ok(ApiResponse::success(children))
}

async fn delete_one<C>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<C>>
where
    C: CityChild,
    Services: ChildServices<C>,
{
    let child = service::<C>(&state).delete(&id).await?;
    Ok(ApiResponse::success_with_message(child, format!("{} deleted", C::NAME)))
}

async fn delete_many<C>(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<DeleteChildrenRequest>,
) -> ApiResult<ApiResponse<Count>>
where
    C: CityChild,
    Services: ChildServices<C>,
{
    let count = service::<C>(&state).delete_many(request).await?;
    Ok(ApiResponse::success_with_message(
        Count { count },
        format!("{} {} deleted", count, C::PLURAL),
    ))
}

/// Swap the city's whole collection for the request's list
async fn replace_all<C, I>(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
    ApiJson(request): ApiJson<ReplaceChildrenRequest<I>>,
) -> ApiResult<ApiResponse<Vec<C>>>
where
    C: CityChild,
    I: ChildInput<Child = C>,
    Services: ChildServices<C>,
{
    let children = service::<C>(&state).replace_all(&city_id, request).await?;
    let message = format!("{} updated", C::PLURAL);
    Ok(ApiResponse::success_with_message(children, message))
}
