//! # Observability & Tracing
//!
//! One compact subscriber for the whole process. Module paths are hidden
//! (`with_target(false)`); actors tag their lines with `entity_type`.
//!
//! **With `RUST_LOG=info`**, opening an order and adding an item reads as
//! below. Actors run in their own tasks, so their lines carry no client
//! span; only the client's own events sit inside `open_order{..}`.
//!
//! ```text
//! INFO Created entity_type="Restaurant" id=restaurant_1 size=1
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO open_order{restaurant_id=RestaurantId(1)}: Opened order order_id=order_1
//! INFO Action ok entity_type="Order" id=order_1
//! ```
//!
//! **With `RUST_LOG=debug`** the actors also log every request payload.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Call once, at process start.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type replaces module paths
        .compact()
        .init();
}
