use crate::api::{ApiResult, AppState, JsonBody, Path};
use crate::model::{MenuItem, MenuItemDraft, MenuItemId, MenuItemUpdate, RestaurantId};
use actor_framework::ActorClient;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

pub async fn list(
    State(state): State<AppState>,
    Path(restaurant_id): Path<RestaurantId>,
) -> ApiResult<Json<Vec<MenuItem>>> {
    Ok(Json(state.menu.menu(restaurant_id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Path(restaurant_id): Path<RestaurantId>,
    JsonBody(payload): JsonBody<MenuItemDraft>,
) -> ApiResult<Json<MenuItem>> {
    Ok(Json(state.menu.add_item(restaurant_id, payload).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<MenuItemId>,
    JsonBody(payload): JsonBody<MenuItemUpdate>,
) -> ApiResult<Json<MenuItem>> {
    Ok(Json(state.menu.update_item(id, payload).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<MenuItemId>,
) -> ApiResult<StatusCode> {
    state.menu.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
