//! Volatile in-process store.
//!
//! Same contract as the PostgreSQL store: referential checks, cascades,
//! the one-open-order rule and order-status guards. Every method holds the
//! table lock for its whole read-check-write, which makes it atomic.

use super::{bump, NextIds, Snapshot, Store, StoreError};
use crate::model::{
    MenuItem, MenuItemId, Order, OrderId, OrderItem, OrderItemId, OrderStatus, Restaurant,
    RestaurantId,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::warn;

#[derive(Default)]
struct Tables {
    restaurants: BTreeMap<RestaurantId, Restaurant>,
    menu_items: BTreeMap<MenuItemId, MenuItem>,
    /// Orders are kept without items; items live in `order_items`.
    orders: BTreeMap<OrderId, Order>,
    order_items: BTreeMap<OrderItemId, OrderItem>,
    next_ids: NextIds,
}

impl Tables {
    fn with_items(&self, order: &Order) -> Order {
        let mut order = order.clone();
        order.items = self
            .order_items
            .values()
            .filter(|item| item.order_id == order.id)
            .cloned()
            .collect();
        order
    }

    /// The guard every item write and order mutation goes through.
    fn open_order(&mut self, id: OrderId) -> Result<&mut Order, StoreError> {
        let order = self
            .orders
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if order.status == OrderStatus::Locked {
            return Err(StoreError::OrderLocked(id));
        }
        Ok(order)
    }

    fn remove_order(&mut self, id: OrderId) {
        self.orders.remove(&id);
        self.order_items.retain(|_, item| item.order_id != id);
    }
}

/// In-memory [`Store`]. Clone the `Arc` around it to share one instance
/// between several systems (e.g. to simulate a restart).
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail with [`StoreError::Backend`] until
    /// switched back. Reads keep working.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            warn!("Memory store rejected a write: unavailable");
            return Err(StoreError::Backend("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn load(&self) -> Result<Snapshot, StoreError> {
        let tables = self.tables.lock().await;
        Ok(Snapshot {
            restaurants: tables.restaurants.values().cloned().collect(),
            menu_items: tables.menu_items.values().cloned().collect(),
            orders: tables
                .orders
                .values()
                .map(|order| tables.with_items(order))
                .collect(),
            next_ids: tables.next_ids,
        })
    }

    async fn insert_restaurant(&self, restaurant: &Restaurant) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.lock().await;
        if tables.restaurants.contains_key(&restaurant.id) {
            return Err(StoreError::Conflict(restaurant.id.to_string()));
        }
        tables.restaurants.insert(restaurant.id, restaurant.clone());
        bump(&mut tables.next_ids.restaurant, restaurant.id.0);
        Ok(())
    }

    async fn update_restaurant(&self, restaurant: &Restaurant) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.lock().await;
        let row = tables
            .restaurants
            .get_mut(&restaurant.id)
            .ok_or_else(|| StoreError::NotFound(restaurant.id.to_string()))?;
        *row = restaurant.clone();
        Ok(())
    }

    async fn delete_restaurant(&self, id: RestaurantId) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.lock().await;
        if tables.restaurants.remove(&id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        tables.menu_items.retain(|_, item| item.restaurant_id != id);
        let orders: Vec<OrderId> = tables
            .orders
            .values()
            .filter(|order| order.restaurant_id == id)
            .map(|order| order.id)
            .collect();
        for order_id in orders {
            tables.remove_order(order_id);
        }
        Ok(())
    }

    async fn insert_menu_item(&self, item: &MenuItem) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.lock().await;
        if !tables.restaurants.contains_key(&item.restaurant_id) {
            return Err(StoreError::NotFound(item.restaurant_id.to_string()));
        }
        tables.menu_items.insert(item.id, item.clone());
        bump(&mut tables.next_ids.menu_item, item.id.0);
        Ok(())
    }

    async fn update_menu_item(&self, item: &MenuItem) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.lock().await;
        let row = tables
            .menu_items
            .get_mut(&item.id)
            .ok_or_else(|| StoreError::NotFound(item.id.to_string()))?;
        *row = item.clone();
        Ok(())
    }

    async fn delete_menu_item(&self, id: MenuItemId) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.lock().await;
        tables
            .menu_items
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn insert_order(&self, order: &Order) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.lock().await;
        if !tables.restaurants.contains_key(&order.restaurant_id) {
            return Err(StoreError::NotFound(order.restaurant_id.to_string()));
        }
        let open_exists = tables.orders.values().any(|existing| {
            existing.restaurant_id == order.restaurant_id && existing.status == OrderStatus::Open
        });
        if open_exists && order.status == OrderStatus::Open {
            return Err(StoreError::Conflict(format!(
                "{} already has an open order",
                order.restaurant_id
            )));
        }
        if tables.orders.contains_key(&order.id) {
            return Err(StoreError::Conflict(order.id.to_string()));
        }
        let mut row = order.clone();
        row.items.clear();
        tables.orders.insert(order.id, row);
        bump(&mut tables.next_ids.order, order.id.0);
        for item in &order.items {
            tables.order_items.insert(item.id, item.clone());
            bump(&mut tables.next_ids.order_item, item.id.0);
        }
        Ok(())
    }

    async fn lock_order(&self, id: OrderId) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.lock().await;
        let order = tables
            .orders
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        order.status = OrderStatus::Locked;
        Ok(())
    }

    async fn set_orderer(&self, id: OrderId, orderer_name: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.lock().await;
        tables.open_order(id)?.orderer_name = orderer_name.to_string();
        Ok(())
    }

    async fn delete_order(&self, id: OrderId) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.lock().await;
        tables.open_order(id)?;
        tables.remove_order(id);
        Ok(())
    }

    async fn insert_order_item(&self, item: &OrderItem) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.lock().await;
        tables.open_order(item.order_id)?;
        tables.order_items.insert(item.id, item.clone());
        bump(&mut tables.next_ids.order_item, item.id.0);
        Ok(())
    }

    async fn update_order_item(&self, item: &OrderItem) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.lock().await;
        let order_id = tables
            .order_items
            .get(&item.id)
            .map(|row| row.order_id)
            .ok_or_else(|| StoreError::NotFound(item.id.to_string()))?;
        tables.open_order(order_id)?;
        tables.order_items.insert(item.id, item.clone());
        Ok(())
    }

    async fn delete_order_item(&self, id: OrderItemId) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.lock().await;
        let order_id = tables
            .order_items
            .get(&id)
            .map(|row| row.order_id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        tables.open_order(order_id)?;
        tables.order_items.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Price, PriceInput};
    use chrono::Utc;

    fn price(s: &str) -> Price {
        Price::parse(Some(&PriceInput::Text(s.into()))).unwrap()
    }

    fn item(id: u32, order_id: u32) -> OrderItem {
        OrderItem {
            id: OrderItemId(id),
            order_id: OrderId(order_id),
            user_name: "Alice".into(),
            item_name: "Latte".into(),
            notes: None,
            price: price("4.50"),
        }
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert_restaurant(&Restaurant::new(RestaurantId(1), "Cafe"))
            .await
            .unwrap();
        store
            .insert_order(&Order::open(OrderId(1), RestaurantId(1), Utc::now()))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn second_open_order_conflicts() {
        let store = seeded().await;
        let second = Order::open(OrderId(2), RestaurantId(1), Utc::now());
        assert!(matches!(
            store.insert_order(&second).await,
            Err(StoreError::Conflict(_))
        ));

        let snapshot = store.load().await.unwrap();
        assert_eq!(snapshot.orders.len(), 1);
        assert_eq!(snapshot.orders[0].id, OrderId(1));
    }

    #[tokio::test]
    async fn order_for_unknown_restaurant_is_not_found() {
        let store = MemoryStore::new();
        let order = Order::open(OrderId(1), RestaurantId(9), Utc::now());
        assert!(matches!(
            store.insert_order(&order).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn locked_order_guards_every_write() {
        let store = seeded().await;
        store.insert_order_item(&item(1, 1)).await.unwrap();
        store.lock_order(OrderId(1)).await.unwrap();
        // idempotent
        store.lock_order(OrderId(1)).await.unwrap();

        let locked = Err(StoreError::OrderLocked(OrderId(1)));
        assert_eq!(store.insert_order_item(&item(2, 1)).await, locked);
        assert_eq!(store.update_order_item(&item(1, 1)).await, locked);
        assert_eq!(store.delete_order_item(OrderItemId(1)).await, locked);
        assert_eq!(store.set_orderer(OrderId(1), "Bob").await, locked);
        assert_eq!(store.delete_order(OrderId(1)).await, locked);

        let snapshot = store.load().await.unwrap();
        assert_eq!(snapshot.orders[0].items, vec![item(1, 1)]);
    }

    #[tokio::test]
    async fn deleting_restaurant_cascades() {
        let store = seeded().await;
        store.insert_order_item(&item(1, 1)).await.unwrap();
        store
            .insert_menu_item(&MenuItem {
                id: MenuItemId(1),
                restaurant_id: RestaurantId(1),
                name: "Latte".into(),
                price: price("4.50"),
            })
            .await
            .unwrap();

        store.delete_restaurant(RestaurantId(1)).await.unwrap();

        let snapshot = store.load().await.unwrap();
        assert!(snapshot.restaurants.is_empty());
        assert!(snapshot.menu_items.is_empty());
        assert!(snapshot.orders.is_empty());
        assert!(matches!(
            store.delete_order_item(OrderItemId(1)).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn unavailable_store_rejects_writes_only() {
        let store = seeded().await;
        store.set_unavailable(true);
        assert!(matches!(
            store.insert_order_item(&item(1, 1)).await,
            Err(StoreError::Backend(_))
        ));
        assert_eq!(store.load().await.unwrap().orders.len(), 1);

        store.set_unavailable(false);
        store.insert_order_item(&item(1, 1)).await.unwrap();
    }

    #[tokio::test]
    async fn deletes_do_not_lower_next_ids() {
        let store = seeded().await;
        store.insert_order_item(&item(1, 1)).await.unwrap();
        store.insert_order_item(&item(2, 1)).await.unwrap();
        store.delete_order(OrderId(1)).await.unwrap();

        let next = store.load().await.unwrap().next_ids;
        assert_eq!(
            next,
            NextIds {
                restaurant: 2,
                menu_item: 1,
                order: 2,
                order_item: 3,
            }
        );
    }
}
