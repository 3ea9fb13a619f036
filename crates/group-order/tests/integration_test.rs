use actor_framework::ActorClient;
use group_order::lifecycle::OrderSystem;
use group_order::model::{
    MenuItemDraft, OrderItemDraft, OrderStatus, PriceInput, RestaurantCreate, RestaurantId,
};
use group_order::order_actor::OrderError;
use group_order::restaurant_actor::RestaurantError;
use group_order::store::{MemoryStore, Store};
use std::sync::Arc;

fn price(value: &str) -> Option<PriceInput> {
    Some(PriceInput::Text(value.to_string()))
}

fn item(user: &str, name: &str, value: &str) -> OrderItemDraft {
    OrderItemDraft {
        user_name: user.to_string(),
        item_name: name.to_string(),
        notes: None,
        price: price(value),
    }
}

fn restaurant(name: &str) -> RestaurantCreate {
    RestaurantCreate {
        name: name.to_string(),
    }
}

async fn start() -> (OrderSystem, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let system = OrderSystem::start(store.clone()).await.unwrap();
    (system, store)
}

#[tokio::test]
async fn test_full_order_lifecycle() {
    let (system, _store) = start().await;

    let cafe = system
        .restaurant_client
        .create_restaurant(restaurant("Cafe"))
        .await
        .unwrap();

    let first = system.order_client.open_order(cafe.id).await.unwrap();
    let second = system.order_client.open_order(cafe.id).await.unwrap();
    assert_eq!(first.id, second.id);

    let latte = system
        .order_client
        .add_item(first.id, item("Alice", "Latte", "4.50"))
        .await
        .unwrap();
    assert_eq!(latte.order_id, first.id);
    let reread = system.order_client.open_order(cafe.id).await.unwrap();
    assert_eq!(reread.items, vec![latte]);

    system.order_client.lock(first.id).await.unwrap();

    let rejected = system
        .order_client
        .add_item(first.id, item("Alice", "Latte", "4.50"))
        .await;
    assert!(matches!(rejected, Err(OrderError::Forbidden(_))));

    let cancel = system.order_client.cancel(first.id).await;
    assert!(matches!(cancel, Err(OrderError::Forbidden(_))));

    let history = system.order_client.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].order.id, first.id);
    assert_eq!(history[0].restaurant_name, "Cafe");

    // A locked order no longer blocks a new open one
    let next = system.order_client.open_order(cafe.id).await.unwrap();
    assert_ne!(next.id, first.id);
    assert_eq!(next.status, OrderStatus::Open);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_negative_price_is_invalid() {
    let (system, _store) = start().await;
    let cafe = system
        .restaurant_client
        .create_restaurant(restaurant("Cafe"))
        .await
        .unwrap();
    let order = system.order_client.open_order(cafe.id).await.unwrap();

    let result = system
        .order_client
        .add_item(order.id, item("Alice", "Latte", "-1"))
        .await;
    assert!(matches!(result, Err(OrderError::InvalidInput(_))));

    let menu = system
        .menu_client
        .add_item(
            cafe.id,
            MenuItemDraft {
                name: "Latte".to_string(),
                price: price("-1"),
            },
        )
        .await;
    assert!(menu.is_err());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_open_order_yields_one_order() {
    let (system, store) = start().await;
    let cafe = system
        .restaurant_client
        .create_restaurant(restaurant("Cafe"))
        .await
        .unwrap();

    let restaurant_id = cafe.id;
    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let client = system.order_client.clone();
            tokio::spawn(async move { client.open_order(restaurant_id).await })
        })
        .collect();

    let mut ids = Vec::new();
    for task in tasks {
        ids.push(task.await.unwrap().unwrap().id);
    }
    ids.dedup();
    assert_eq!(ids.len(), 1);

    let snapshot = store.load().await.unwrap();
    assert_eq!(snapshot.orders.len(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_lock_racing_item_additions() {
    let (system, _store) = start().await;
    let cafe = system
        .restaurant_client
        .create_restaurant(restaurant("Cafe"))
        .await
        .unwrap();
    let order_id = system.order_client.open_order(cafe.id).await.unwrap().id;

    let adds: Vec<_> = (0..10)
        .map(|i| {
            let client = system.order_client.clone();
            let draft = item(&format!("guest{i}"), "Tea", "2.00");
            tokio::spawn(async move { client.add_item(order_id, draft).await })
        })
        .collect();
    let lock = {
        let client = system.order_client.clone();
        tokio::spawn(async move { client.lock(order_id).await })
    };

    let mut accepted = 0;
    for add in adds {
        match add.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(OrderError::Forbidden(_)) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    lock.await.unwrap().unwrap();

    // Every accepted addition is in the locked order, nothing else is
    let locked = system.order_client.get_order(order_id).await.unwrap();
    assert!(locked.is_locked());
    assert_eq!(locked.items.len(), accepted);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_state_survives_restart() {
    let store = Arc::new(MemoryStore::new());

    let system = OrderSystem::start(store.clone()).await.unwrap();
    let cafe = system
        .restaurant_client
        .create_restaurant(restaurant("Cafe"))
        .await
        .unwrap();
    system
        .menu_client
        .add_item(
            cafe.id,
            MenuItemDraft {
                name: "Latte".to_string(),
                price: price("4.50"),
            },
        )
        .await
        .unwrap();
    let order = system.order_client.open_order(cafe.id).await.unwrap();
    let latte = system
        .order_client
        .add_item(order.id, item("Alice", "Latte", "4.50"))
        .await
        .unwrap();
    let before = system.order_client.get_order(order.id).await.unwrap();
    system.shutdown().await.unwrap();

    let system = OrderSystem::start(store.clone()).await.unwrap();
    let after = system.order_client.get_order(order.id).await.unwrap();
    assert_eq!(after, before);
    assert_eq!(system.menu_client.menu(cafe.id).await.unwrap().len(), 1);

    // Ids continue after the restored ones
    let tea = system
        .order_client
        .add_item(order.id, item("Bob", "Tea", "3"))
        .await
        .unwrap();
    assert!(tea.id > latte.id);
    let bistro = system
        .restaurant_client
        .create_restaurant(restaurant("Bistro"))
        .await
        .unwrap();
    assert!(bistro.id > cafe.id);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_deleted_ids_are_not_reused_after_restart() {
    let store = Arc::new(MemoryStore::new());

    let system = OrderSystem::start(store.clone()).await.unwrap();
    let cafe = system
        .restaurant_client
        .create_restaurant(restaurant("Cafe"))
        .await
        .unwrap();
    let bistro = system
        .restaurant_client
        .create_restaurant(restaurant("Bistro"))
        .await
        .unwrap();
    let cancelled = system.order_client.open_order(cafe.id).await.unwrap();
    let removed = system
        .order_client
        .add_item(cancelled.id, item("Alice", "Latte", "4.50"))
        .await
        .unwrap();
    system.order_client.cancel(cancelled.id).await.unwrap();
    system.restaurant_client.delete(bistro.id).await.unwrap();
    system.shutdown().await.unwrap();

    let system = OrderSystem::start(store.clone()).await.unwrap();
    let order = system.order_client.open_order(cafe.id).await.unwrap();
    assert_ne!(order.id, cancelled.id);
    let latte = system
        .order_client
        .add_item(order.id, item("Alice", "Latte", "4.50"))
        .await
        .unwrap();
    assert_ne!(latte.id, removed.id);
    let diner = system
        .restaurant_client
        .create_restaurant(restaurant("Diner"))
        .await
        .unwrap();
    assert_ne!(diner.id, bistro.id);

    // A stale id from before the restart still points nowhere
    let stale = system
        .order_client
        .add_item(cancelled.id, item("Mallory", "Tea", "1"))
        .await;
    assert!(matches!(stale, Err(OrderError::NotFound(_))));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_deleting_restaurant_cascades() {
    let (system, store) = start().await;
    let cafe = system
        .restaurant_client
        .create_restaurant(restaurant("Cafe"))
        .await
        .unwrap();
    let bistro = system
        .restaurant_client
        .create_restaurant(restaurant("Bistro"))
        .await
        .unwrap();
    for id in [cafe.id, bistro.id] {
        system
            .menu_client
            .add_item(
                id,
                MenuItemDraft {
                    name: "Soup".to_string(),
                    price: price("5"),
                },
            )
            .await
            .unwrap();
        let order = system.order_client.open_order(id).await.unwrap();
        system
            .order_client
            .add_item(order.id, item("Alice", "Soup", "5"))
            .await
            .unwrap();
    }

    system.restaurant_client.delete(cafe.id).await.unwrap();

    assert!(system.menu_client.menu(cafe.id).await.unwrap().is_empty());
    let history = system.order_client.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].order.restaurant_id, bistro.id);

    let snapshot = store.load().await.unwrap();
    assert_eq!(snapshot.restaurants.len(), 1);
    assert_eq!(snapshot.menu_items.len(), 1);
    assert_eq!(snapshot.orders.len(), 1);

    let reopened = system.order_client.open_order(cafe.id).await;
    assert!(matches!(reopened, Err(OrderError::NotFound(_))));
    let missing = system.restaurant_client.delete(RestaurantId(99)).await;
    assert!(matches!(missing, Err(RestaurantError::NotFound(_))));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_storage_failure_leaves_state_untouched() {
    let (system, store) = start().await;
    let cafe = system
        .restaurant_client
        .create_restaurant(restaurant("Cafe"))
        .await
        .unwrap();
    let order = system.order_client.open_order(cafe.id).await.unwrap();

    store.set_unavailable(true);
    let add = system
        .order_client
        .add_item(order.id, item("Alice", "Latte", "4.50"))
        .await;
    assert!(matches!(add, Err(OrderError::DatabaseError(_))));
    let lock = system.order_client.lock(order.id).await;
    assert!(matches!(lock, Err(OrderError::DatabaseError(_))));
    store.set_unavailable(false);

    let unchanged = system.order_client.get_order(order.id).await.unwrap();
    assert_eq!(unchanged, order);

    // The failed addition did not burn the order: it still accepts items
    system
        .order_client
        .add_item(order.id, item("Alice", "Latte", "4.50"))
        .await
        .unwrap();

    system.shutdown().await.unwrap();
}
