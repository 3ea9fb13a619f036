//! PostgreSQL store.
//!
//! The schema lives in `migrations/` and is applied at startup. Ids are
//! assigned by the service, so every insert carries its id. Guarded writes
//! run in a transaction that first takes the order row with
//! `SELECT ... FOR UPDATE`: a concurrent lock either commits before the
//! guard reads the status (and the write is refused) or waits until the
//! write commits.
//!
//! Insert triggers keep `id_high_water` at the largest id each table has
//! seen; [`Store::load`] turns it into [`NextIds`].

use super::{NextIds, Snapshot, Store, StoreError};
use crate::model::{
    MenuItem, MenuItemId, Order, OrderId, OrderItem, OrderItemId, OrderStatus, Price, Restaurant,
    RestaurantId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{FromRow, Postgres, Transaction};
use std::collections::BTreeMap;
use tracing::info;

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => StoreError::NotFound(e.to_string()),
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                StoreError::NotFound(db.message().to_string())
            }
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict(db.message().to_string())
            }
            _ => StoreError::Backend(e.to_string()),
        }
    }
}

fn to_u32(column: &str, value: i64) -> Result<u32, StoreError> {
    u32::try_from(value)
        .map_err(|_| StoreError::Backend(format!("{column} out of range: {value}")))
}

fn to_price(value: Decimal) -> Result<Price, StoreError> {
    Price::new(value).map_err(|e| StoreError::Backend(format!("stored price rejected: {e}")))
}

#[derive(FromRow)]
struct RestaurantRow {
    id: i64,
    name: String,
}

impl TryFrom<RestaurantRow> for Restaurant {
    type Error = StoreError;

    fn try_from(row: RestaurantRow) -> Result<Self, Self::Error> {
        Ok(Restaurant::new(RestaurantId(to_u32("restaurants.id", row.id)?), row.name))
    }
}

#[derive(FromRow)]
struct MenuItemRow {
    id: i64,
    restaurant_id: i64,
    name: String,
    price: Decimal,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = StoreError;

    fn try_from(row: MenuItemRow) -> Result<Self, Self::Error> {
        Ok(MenuItem {
            id: MenuItemId(to_u32("menu_items.id", row.id)?),
            restaurant_id: RestaurantId(to_u32("menu_items.restaurant_id", row.restaurant_id)?),
            name: row.name,
            price: to_price(row.price)?,
        })
    }
}

#[derive(FromRow)]
struct OrderRow {
    id: i64,
    restaurant_id: i64,
    orderer_name: String,
    created_at: DateTime<Utc>,
    status: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = StoreError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status: OrderStatus = row
            .status
            .parse()
            .map_err(|e| StoreError::Backend(format!("orders.status: {e}")))?;
        Ok(Order {
            id: OrderId(to_u32("orders.id", row.id)?),
            restaurant_id: RestaurantId(to_u32("orders.restaurant_id", row.restaurant_id)?),
            orderer_name: row.orderer_name,
            created_at: row.created_at,
            status,
            items: Vec::new(),
        })
    }
}

#[derive(FromRow)]
struct OrderItemRow {
    id: i64,
    order_id: i64,
    user_name: String,
    item_name: String,
    notes: Option<String>,
    price: Decimal,
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = StoreError;

    fn try_from(row: OrderItemRow) -> Result<Self, Self::Error> {
        Ok(OrderItem {
            id: OrderItemId(to_u32("order_items.id", row.id)?),
            order_id: OrderId(to_u32("order_items.order_id", row.order_id)?),
            user_name: row.user_name,
            item_name: row.item_name,
            notes: row.notes,
            price: to_price(row.price)?,
        })
    }
}

/// PostgreSQL-backed [`Store`].
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a pool and applies pending migrations.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to connect: {e}")))?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(format!("Migration failed: {e}")))?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Takes the order row lock and checks the order is still open.
    async fn lock_open_order(
        tx: &mut Transaction<'_, Postgres>,
        id: OrderId,
    ) -> Result<(), StoreError> {
        let status: Option<String> =
            sqlx::query_scalar("SELECT status FROM orders WHERE id = $1 FOR UPDATE")
                .bind(i64::from(id.0))
                .fetch_optional(&mut **tx)
                .await?;
        match status.as_deref() {
            None => Err(StoreError::NotFound(id.to_string())),
            Some("open") => Ok(()),
            Some(_) => Err(StoreError::OrderLocked(id)),
        }
    }

    /// Resolves the parent order of an item and guards it.
    async fn lock_item_order(
        tx: &mut Transaction<'_, Postgres>,
        id: OrderItemId,
    ) -> Result<(), StoreError> {
        let order_id: Option<i64> =
            sqlx::query_scalar("SELECT order_id FROM order_items WHERE id = $1")
                .bind(i64::from(id.0))
                .fetch_optional(&mut **tx)
                .await?;
        let order_id = order_id.ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Self::lock_open_order(tx, OrderId(to_u32("order_items.order_id", order_id)?)).await
    }
}

#[async_trait]
impl Store for PgStore {
    async fn load(&self) -> Result<Snapshot, StoreError> {
        let restaurants = sqlx::query_as::<_, RestaurantRow>(
            "SELECT id, name FROM restaurants ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Restaurant::try_from)
        .collect::<Result<Vec<_>, _>>()?;

        let menu_items = sqlx::query_as::<_, MenuItemRow>(
            "SELECT id, restaurant_id, name, price FROM menu_items ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(MenuItem::try_from)
        .collect::<Result<Vec<_>, _>>()?;

        let mut orders = sqlx::query_as::<_, OrderRow>(
            "SELECT id, restaurant_id, orderer_name, created_at, status FROM orders ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|row| Order::try_from(row).map(|order| (order.id, order)))
        .collect::<Result<BTreeMap<_, _>, _>>()?;

        let items = sqlx::query_as::<_, OrderItemRow>(
            "SELECT id, order_id, user_name, item_name, notes, price FROM order_items ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        for item in items {
            let item = OrderItem::try_from(item)?;
            if let Some(order) = orders.get_mut(&item.order_id) {
                order.items.push(item);
            }
        }

        let marks: Vec<(String, i64)> =
            sqlx::query_as("SELECT table_name, last_id FROM id_high_water")
                .fetch_all(&self.pool)
                .await?;
        let mut next_ids = NextIds::default();
        for (table, last_id) in marks {
            let next = to_u32("id_high_water.last_id", last_id)?.saturating_add(1);
            match table.as_str() {
                "restaurants" => next_ids.restaurant = next,
                "menu_items" => next_ids.menu_item = next,
                "orders" => next_ids.order = next,
                "order_items" => next_ids.order_item = next,
                _ => {}
            }
        }

        info!(
            restaurants = restaurants.len(),
            menu_items = menu_items.len(),
            orders = orders.len(),
            ?next_ids,
            "Snapshot loaded"
        );
        Ok(Snapshot {
            restaurants,
            menu_items,
            orders: orders.into_values().collect(),
            next_ids,
        }
        .covering_rows())
    }

    async fn insert_restaurant(&self, restaurant: &Restaurant) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO restaurants (id, name) VALUES ($1, $2)")
            .bind(i64::from(restaurant.id.0))
            .bind(&restaurant.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_restaurant(&self, restaurant: &Restaurant) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE restaurants SET name = $2 WHERE id = $1")
            .bind(i64::from(restaurant.id.0))
            .bind(&restaurant.name)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(restaurant.id.to_string()));
        }
        Ok(())
    }

    async fn delete_restaurant(&self, id: RestaurantId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(i64::from(id.0))
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn insert_menu_item(&self, item: &MenuItem) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO menu_items (id, restaurant_id, name, price) VALUES ($1, $2, $3, $4)")
            .bind(i64::from(item.id.0))
            .bind(i64::from(item.restaurant_id.0))
            .bind(&item.name)
            .bind(item.price.amount())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_menu_item(&self, item: &MenuItem) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE menu_items SET name = $2, price = $3 WHERE id = $1")
            .bind(i64::from(item.id.0))
            .bind(&item.name)
            .bind(item.price.amount())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(item.id.to_string()));
        }
        Ok(())
    }

    async fn delete_menu_item(&self, id: MenuItemId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(i64::from(id.0))
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn insert_order(&self, order: &Order) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO orders (id, restaurant_id, orderer_name, created_at, status) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(i64::from(order.id.0))
        .bind(i64::from(order.restaurant_id.0))
        .bind(&order.orderer_name)
        .bind(order.created_at)
        .bind(order.status.as_str())
        .execute(&mut *tx)
        .await?;
        for item in &order.items {
            insert_item(&mut tx, item).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn lock_order(&self, id: OrderId) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE orders SET status = 'locked' WHERE id = $1")
            .bind(i64::from(id.0))
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn set_orderer(&self, id: OrderId, orderer_name: &str) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        Self::lock_open_order(&mut tx, id).await?;
        sqlx::query("UPDATE orders SET orderer_name = $2 WHERE id = $1")
            .bind(i64::from(id.0))
            .bind(orderer_name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete_order(&self, id: OrderId) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        Self::lock_open_order(&mut tx, id).await?;
        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(i64::from(id.0))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn insert_order_item(&self, item: &OrderItem) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        Self::lock_open_order(&mut tx, item.order_id).await?;
        insert_item(&mut tx, item).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn update_order_item(&self, item: &OrderItem) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        Self::lock_item_order(&mut tx, item.id).await?;
        sqlx::query(
            "UPDATE order_items SET user_name = $2, item_name = $3, notes = $4, price = $5 \
             WHERE id = $1",
        )
        .bind(i64::from(item.id.0))
        .bind(&item.user_name)
        .bind(&item.item_name)
        .bind(item.notes.as_deref())
        .bind(item.price.amount())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete_order_item(&self, id: OrderItemId) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        Self::lock_item_order(&mut tx, id).await?;
        sqlx::query("DELETE FROM order_items WHERE id = $1")
            .bind(i64::from(id.0))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

async fn insert_item(
    tx: &mut Transaction<'_, Postgres>,
    item: &OrderItem,
) -> Result<(), StoreError> {
    sqlx::query(
        "INSERT INTO order_items (id, order_id, user_name, item_name, notes, price) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(i64::from(item.id.0))
    .bind(i64::from(item.order_id.0))
    .bind(&item.user_name)
    .bind(&item.item_name)
    .bind(item.notes.as_deref())
    .bind(item.price.amount())
    .execute(&mut **tx)
    .await?;
    Ok(())
}
