//! # Durable Store
//!
//! Write-through persistence beneath the actors. The actors keep the
//! authoritative working set in memory; every mutation is written here
//! first and only committed in memory once the write succeeded.
//!
//! Two implementations share one contract:
//!
//! - [`PgStore`]: PostgreSQL via `sqlx`. Cascades are foreign keys, the
//!   one-open-order rule is a partial unique index and guarded writes lock
//!   the order row with `SELECT ... FOR UPDATE`.
//! - [`MemoryStore`]: volatile tables behind a mutex with the same
//!   cascades, guards and conflicts. Used for `memory://` and in tests.
//!
//! ## Guarded writes
//!
//! `set_orderer`, `delete_order` and every order item write re-read the
//! parent order's status in the same atomic unit as the write and fail with
//! [`StoreError::OrderLocked`] if it is locked.
//!
//! ## Id high-water marks
//!
//! Ids are assigned by the actors, but the store remembers the largest id
//! ever inserted per table ([`NextIds`]). Deletes never lower it, so a
//! restart does not hand out the id of a cancelled order or removed item
//! again.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::model::{
    MenuItem, MenuItemId, Order, OrderId, OrderItem, OrderItemId, Restaurant, RestaurantId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors reported by a [`Store`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The row, or the row it references, does not exist.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The parent order is locked; the write was not applied.
    #[error("Order {0} is locked")]
    OrderLocked(OrderId),

    /// A uniqueness rule rejected the write (e.g. a second open order).
    #[error("Conflicting record: {0}")]
    Conflict(String),

    /// Connection, query or migration failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Next free id per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextIds {
    pub restaurant: u32,
    pub menu_item: u32,
    pub order: u32,
    pub order_item: u32,
}

impl Default for NextIds {
    fn default() -> Self {
        Self {
            restaurant: 1,
            menu_item: 1,
            order: 1,
            order_item: 1,
        }
    }
}

/// Raises `next` past `id`.
pub(crate) fn bump(next: &mut u32, id: u32) {
    *next = (*next).max(id.saturating_add(1));
}

/// Everything persisted, as loaded at startup. Orders carry their items.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub restaurants: Vec<Restaurant>,
    pub menu_items: Vec<MenuItem>,
    pub orders: Vec<Order>,
    pub next_ids: NextIds,
}

impl Snapshot {
    /// Raises `next_ids` past every loaded row, for stores whose marks may
    /// lag behind their rows.
    pub fn covering_rows(mut self) -> Self {
        let next = &mut self.next_ids;
        for restaurant in &self.restaurants {
            bump(&mut next.restaurant, restaurant.id.0);
        }
        for item in &self.menu_items {
            bump(&mut next.menu_item, item.id.0);
        }
        for order in &self.orders {
            bump(&mut next.order, order.id.0);
            for item in &order.items {
                bump(&mut next.order_item, item.id.0);
            }
        }
        self
    }
}

/// Shared handle to the store, injected into every actor's context.
pub type SharedStore = Arc<dyn Store>;

/// Persistence contract for the group-ordering service.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Reads every table.
    async fn load(&self) -> Result<Snapshot, StoreError>;

    async fn insert_restaurant(&self, restaurant: &Restaurant) -> Result<(), StoreError>;
    async fn update_restaurant(&self, restaurant: &Restaurant) -> Result<(), StoreError>;
    /// Deletes the restaurant with its menu items, orders and their items.
    async fn delete_restaurant(&self, id: RestaurantId) -> Result<(), StoreError>;

    async fn insert_menu_item(&self, item: &MenuItem) -> Result<(), StoreError>;
    async fn update_menu_item(&self, item: &MenuItem) -> Result<(), StoreError>;
    async fn delete_menu_item(&self, id: MenuItemId) -> Result<(), StoreError>;

    /// Fails with [`StoreError::Conflict`] if the restaurant already has an
    /// open order.
    async fn insert_order(&self, order: &Order) -> Result<(), StoreError>;
    /// Idempotent: locking a locked order succeeds.
    async fn lock_order(&self, id: OrderId) -> Result<(), StoreError>;
    async fn set_orderer(&self, id: OrderId, orderer_name: &str) -> Result<(), StoreError>;
    /// Deletes an open order and its items.
    async fn delete_order(&self, id: OrderId) -> Result<(), StoreError>;

    async fn insert_order_item(&self, item: &OrderItem) -> Result<(), StoreError>;
    async fn update_order_item(&self, item: &OrderItem) -> Result<(), StoreError>;
    async fn delete_order_item(&self, id: OrderItemId) -> Result<(), StoreError>;
}
