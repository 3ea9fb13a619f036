use crate::api::{ApiResult, AppState, JsonBody, Path};
use crate::model::{Restaurant, RestaurantCreate, RestaurantId, RestaurantUpdate};
use actor_framework::ActorClient;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Restaurant>>> {
    Ok(Json(state.restaurants.list().await?))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RestaurantCreate>,
) -> ApiResult<Json<Restaurant>> {
    Ok(Json(state.restaurants.create_restaurant(payload).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<RestaurantId>,
    JsonBody(payload): JsonBody<RestaurantUpdate>,
) -> ApiResult<Json<Restaurant>> {
    Ok(Json(state.restaurants.update_restaurant(id, payload).await?))
}

/// Deletes the restaurant with its menu and orders.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<RestaurantId>,
) -> ApiResult<StatusCode> {
    state.restaurants.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
