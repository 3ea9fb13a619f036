//! # Order Actor
//!
//! The core of the service: every group order, its status and its item
//! ledger live in one `ResourceActor<Order>`. Because the actor handles one
//! request at a time, a lock and an item mutation for the same order can
//! never interleave: whichever message is processed first wins, and the
//! other observes its result.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`actions`] - [`OrderAction`] / [`OrderActionResult`] (lock, item ledger)
//! - [`error`] - [`OrderError`]
//! - [`restore()`] - Factory function that creates the actor and client
//!
//! ## Mapping
//!
//! | Operation | Framework call |
//! |---|---|
//! | open a new order | `create` |
//! | rename orderer | `update` |
//! | cancel | `delete` |
//! | lock / add / edit / remove item | `perform_action` |

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::{Order, OrderItemId};
use crate::store::SharedStore;
use actor_framework::{ResourceActor, ResourceClient};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Sequential id generator for order items.
#[derive(Debug, Clone)]
pub struct ItemIds(Arc<AtomicU32>);

impl ItemIds {
    pub fn starting_at(next: u32) -> Self {
        Self(Arc::new(AtomicU32::new(next.max(1))))
    }

    pub fn next(&self) -> OrderItemId {
        OrderItemId(self.0.fetch_add(1, Ordering::SeqCst))
    }
}

/// Dependencies injected into the Order actor at `run()` time.
#[derive(Clone)]
pub struct OrderContext {
    pub store: SharedStore,
    pub item_ids: ItemIds,
}

impl OrderContext {
    /// Item ids start at `next_item_id`.
    pub fn new(store: SharedStore, next_item_id: u32) -> Self {
        Self {
            store,
            item_ids: ItemIds::starting_at(next_item_id),
        }
    }
}

/// Creates an Order actor seeded with `orders`, and its client. New ids
/// start at `next_id`.
pub fn restore(orders: Vec<Order>, next_id: u32) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::restore(64, orders, next_id)
}
