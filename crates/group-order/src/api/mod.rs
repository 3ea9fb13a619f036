//! HTTP layer.
//!
//! A thin mapping from routes to client calls. Handlers never touch the
//! store; every request goes through the actor clients held in
//! [`AppState`].

mod error;
pub mod menu;
pub mod orders;
pub mod restaurants;

pub use error::{ApiError, ApiResult, JsonBody, Path};

use crate::clients::{MenuClient, OrderClient, RestaurantClient};
use crate::lifecycle::OrderSystem;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Shared handler state: one client per actor.
#[derive(Clone)]
pub struct AppState {
    pub restaurants: RestaurantClient,
    pub menu: MenuClient,
    pub orders: OrderClient,
}

impl AppState {
    pub fn new(system: &OrderSystem) -> Self {
        Self {
            restaurants: system.restaurant_client.clone(),
            menu: system.menu_client.clone(),
            orders: system.order_client.clone(),
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(restaurants::router())
        .merge(menu::router())
        .merge(orders::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
