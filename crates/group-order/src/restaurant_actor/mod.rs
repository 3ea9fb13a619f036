//! # Restaurant Actor
//!
//! Owns the restaurant table. Plain CRUD with one cross-actor effect:
//! deleting a restaurant evicts its menu items and orders.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Restaurant`]
//! - [`error`] - [`RestaurantError`] type for type-safe error handling
//! - [`restore()`] - Factory function that creates the actor and client
//!
//! ## Dependencies
//!
//! The context holds the raw menu and order `ResourceClient`s, not the
//! domain clients: those hold a `RestaurantClient`, and an actor that keeps
//! a sender to its own mailbox would never see its channel close.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::{MenuItem, Order, Restaurant};
use crate::store::SharedStore;
use actor_framework::{ResourceActor, ResourceClient};

/// Dependencies injected into the Restaurant actor at `run()` time.
#[derive(Clone)]
pub struct RestaurantContext {
    pub store: SharedStore,
    pub menu: ResourceClient<MenuItem>,
    pub orders: ResourceClient<Order>,
}

/// Creates a Restaurant actor seeded with `restaurants`, and its client.
/// New ids start at `next_id`.
pub fn restore(
    restaurants: Vec<Restaurant>,
    next_id: u32,
) -> (ResourceActor<Restaurant>, ResourceClient<Restaurant>) {
    ResourceActor::restore(32, restaurants, next_id)
}
