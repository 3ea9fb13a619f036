//! Menu routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | /api/restaurants/{id}/menu | list |
//! | POST | /api/restaurants/{id}/menu | create |
//! | PUT | /api/menu/{id} | update |
//! | DELETE | /api/menu/{id} | delete |

mod handler;

use super::AppState;
use axum::routing::{get, put};
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/restaurants/{id}/menu",
            get(handler::list).post(handler::create),
        )
        .route(
            "/api/menu/{id}",
            put(handler::update).delete(handler::delete),
        )
}
