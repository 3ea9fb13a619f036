//! Restaurant routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | /api/restaurants | list |
//! | POST | /api/restaurants | create |
//! | PUT | /api/restaurants/{id} | update |
//! | DELETE | /api/restaurants/{id} | delete |

mod handler;

use super::AppState;
use axum::routing::{get, put};
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/restaurants", get(handler::list).post(handler::create))
        .route(
            "/api/restaurants/{id}",
            put(handler::update).delete(handler::delete),
        )
}
