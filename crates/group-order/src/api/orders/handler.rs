use crate::api::{ApiResult, AppState, JsonBody, Path};
use crate::model::{
    Order, OrderId, OrderItem, OrderItemDraft, OrderItemId, OrderItemPatch, OrderState,
    OrderSummary, OrdererUpdate, RestaurantId,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

/// Locked orders and open orders with items, newest first.
pub async fn history(State(state): State<AppState>) -> ApiResult<Json<Vec<OrderSummary>>> {
    Ok(Json(state.orders.history().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.get_order(order_id).await?))
}

/// Get-or-create: every caller sees the same open order.
pub async fn open_order(
    State(state): State<AppState>,
    Path(restaurant_id): Path<RestaurantId>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.open_order(restaurant_id).await?))
}

pub async fn add_item(
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
    JsonBody(payload): JsonBody<OrderItemDraft>,
) -> ApiResult<Json<OrderItem>> {
    Ok(Json(state.orders.add_item(order_id, payload).await?))
}

pub async fn edit_item(
    State(state): State<AppState>,
    Path(item_id): Path<OrderItemId>,
    JsonBody(payload): JsonBody<OrderItemPatch>,
) -> ApiResult<Json<OrderItem>> {
    Ok(Json(state.orders.edit_item(item_id, payload).await?))
}

pub async fn remove_item(
    State(state): State<AppState>,
    Path(item_id): Path<OrderItemId>,
) -> ApiResult<StatusCode> {
    state.orders.remove_item(item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn lock(
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
) -> ApiResult<Json<OrderState>> {
    Ok(Json(state.orders.lock(order_id).await?))
}

pub async fn set_orderer(
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
    JsonBody(payload): JsonBody<OrdererUpdate>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.set_orderer(order_id, payload).await?))
}

pub async fn cancel(
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
) -> ApiResult<StatusCode> {
    state.orders.cancel(order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
