//! Order routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | /api/orders | history |
//! | GET | /api/orders/{order_id} | get |
//! | DELETE | /api/orders/{order_id} | cancel |
//! | POST | /api/orders/{order_id}/items | add_item |
//! | POST | /api/orders/{order_id}/lock | lock |
//! | PUT | /api/orders/{order_id}/orderer | set_orderer |
//! | PUT | /api/order-items/{id} | edit_item |
//! | DELETE | /api/order-items/{id} | remove_item |
//! | GET | /api/restaurants/{id}/open-order | open_order |

mod handler;

use super::AppState;
use axum::routing::{get, post, put};
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(handler::history))
        .route(
            "/api/orders/{order_id}",
            get(handler::get).delete(handler::cancel),
        )
        .route("/api/orders/{order_id}/items", post(handler::add_item))
        .route("/api/orders/{order_id}/lock", post(handler::lock))
        .route("/api/orders/{order_id}/orderer", put(handler::set_orderer))
        .route(
            "/api/order-items/{id}",
            put(handler::edit_item).delete(handler::remove_item),
        )
        .route("/api/restaurants/{id}/open-order", get(handler::open_order))
}
