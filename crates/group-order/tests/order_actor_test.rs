use actor_framework::mock::MockClient;
use group_order::clients::{OrderClient, RestaurantClient};
use group_order::model::{
    OrderItemDraft, OrderItemPatch, OrderStatus, OrdererUpdate, PriceInput, Restaurant,
    RestaurantId,
};
use group_order::order_actor::{self, OrderContext, OrderError};
use group_order::store::{MemoryStore, SharedStore, Store};
use std::sync::Arc;

fn draft(user: &str, item: &str, price: &str) -> OrderItemDraft {
    OrderItemDraft {
        user_name: user.to_string(),
        item_name: item.to_string(),
        notes: None,
        price: Some(PriceInput::Text(price.to_string())),
    }
}

async fn store_with_cafe() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store
        .insert_restaurant(&Restaurant::new(RestaurantId(1), "Cafe"))
        .await
        .unwrap();
    store
}

/// Real Order actor over an in-memory store, with the Restaurant actor mocked.
///
/// Actor + Mocks
/// - Real Order actor (state machine and item ledger)
/// - Mocked Restaurant client (only answers the existence checks)
#[tokio::test]
async fn test_order_actor_with_mocked_restaurants() {
    let store = store_with_cafe().await;
    let shared: SharedStore = store.clone();

    let mut restaurant_mock = MockClient::<Restaurant>::new();
    restaurant_mock
        .expect_get(RestaurantId(1))
        .return_ok(Some(Restaurant::new(RestaurantId(1), "Cafe")));
    restaurant_mock
        .expect_get(RestaurantId(1))
        .return_ok(Some(Restaurant::new(RestaurantId(1), "Cafe")));

    let (order_actor, orders) = order_actor::restore(Vec::new(), 1);
    let context = OrderContext::new(shared, 1);
    let handle = tokio::spawn(order_actor.run(context));
    let client = OrderClient::new(orders, RestaurantClient::new(restaurant_mock.client()));

    let first = client.open_order(RestaurantId(1)).await.unwrap();
    let second = client.open_order(RestaurantId(1)).await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(first.status, OrderStatus::Open);

    let latte = client
        .add_item(first.id, draft("Alice", "Latte", "4.50"))
        .await
        .unwrap();
    assert_eq!(latte.price.to_string(), "4.50");

    let edited = client
        .edit_item(
            latte.id,
            OrderItemPatch {
                notes: Some("oat milk".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.notes.as_deref(), Some("oat milk"));

    let renamed = client
        .set_orderer(
            first.id,
            OrdererUpdate {
                orderer_name: Some("Bob".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.orderer_name, "Bob");

    let state = client.lock(first.id).await.unwrap();
    assert_eq!(state.status, OrderStatus::Locked);

    // Persisted alongside the in-memory state
    let snapshot = store.load().await.unwrap();
    assert_eq!(snapshot.orders.len(), 1);
    assert_eq!(snapshot.orders[0], client.get_order(first.id).await.unwrap());

    restaurant_mock.verify();
    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_locked_order_rejects_every_mutation() {
    let store = store_with_cafe().await;
    let mut restaurant_mock = MockClient::<Restaurant>::new();
    restaurant_mock
        .expect_get(RestaurantId(1))
        .return_ok(Some(Restaurant::new(RestaurantId(1), "Cafe")));

    let (order_actor, orders) = order_actor::restore(Vec::new(), 1);
    let handle = tokio::spawn(order_actor.run(OrderContext::new(store.clone(), 1)));
    let client = OrderClient::new(orders, RestaurantClient::new(restaurant_mock.client()));

    let order = client.open_order(RestaurantId(1)).await.unwrap();
    let item = client
        .add_item(order.id, draft("Alice", "Latte", "4.50"))
        .await
        .unwrap();
    client.lock(order.id).await.unwrap();

    let add = client.add_item(order.id, draft("Carol", "Tea", "3")).await;
    assert!(matches!(add, Err(OrderError::Forbidden(_))));

    let edit = client
        .edit_item(
            item.id,
            OrderItemPatch {
                price: Some(PriceInput::Text("1".to_string())),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(edit, Err(OrderError::Forbidden(_))));

    let remove = client.remove_item(item.id).await;
    assert!(matches!(remove, Err(OrderError::Forbidden(_))));

    let rename = client
        .set_orderer(
            order.id,
            OrdererUpdate {
                orderer_name: Some("Dave".to_string()),
            },
        )
        .await;
    assert!(matches!(rename, Err(OrderError::Forbidden(_))));

    let cancel = client.cancel(order.id).await;
    assert!(matches!(cancel, Err(OrderError::Forbidden(_))));

    // Locking again is a no-op
    let state = client.lock(order.id).await.unwrap();
    assert_eq!(state.status, OrderStatus::Locked);

    let unchanged = client.get_order(order.id).await.unwrap();
    assert_eq!(unchanged.items, vec![item]);

    restaurant_mock.verify();
    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_invalid_items_are_rejected_before_storage() {
    let store = store_with_cafe().await;
    let mut restaurant_mock = MockClient::<Restaurant>::new();
    restaurant_mock
        .expect_get(RestaurantId(1))
        .return_ok(Some(Restaurant::new(RestaurantId(1), "Cafe")));

    let (order_actor, orders) = order_actor::restore(Vec::new(), 1);
    let handle = tokio::spawn(order_actor.run(OrderContext::new(store.clone(), 1)));
    let client = OrderClient::new(orders, RestaurantClient::new(restaurant_mock.client()));

    let order = client.open_order(RestaurantId(1)).await.unwrap();

    let negative = client.add_item(order.id, draft("Alice", "Latte", "-1")).await;
    assert!(matches!(negative, Err(OrderError::InvalidInput(_))));

    let nameless = client.add_item(order.id, draft("  ", "Latte", "4.50")).await;
    assert!(matches!(nameless, Err(OrderError::InvalidInput(_))));

    let blank_orderer = client
        .set_orderer(
            order.id,
            OrdererUpdate {
                orderer_name: Some(String::new()),
            },
        )
        .await;
    assert!(matches!(blank_orderer, Err(OrderError::InvalidInput(_))));

    let snapshot = store.load().await.unwrap();
    assert!(snapshot.orders[0].items.is_empty());

    restaurant_mock.verify();
    drop(client);
    handle.await.unwrap();
}
