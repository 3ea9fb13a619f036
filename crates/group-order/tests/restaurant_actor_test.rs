use actor_framework::mock::{create_mock_client, expect_retain, MockClient};
use actor_framework::ActorClient;
use chrono::Utc;
use group_order::clients::RestaurantClient;
use group_order::model::{
    MenuItem, MenuItemId, Order, OrderId, Price, Restaurant, RestaurantCreate, RestaurantId,
};
use group_order::restaurant_actor::{self, RestaurantContext, RestaurantError};
use group_order::store::{MemoryStore, SharedStore, Store};
use rust_decimal::Decimal;
use std::sync::Arc;

fn soup(id: u32, restaurant_id: RestaurantId) -> MenuItem {
    MenuItem {
        id: MenuItemId(id),
        restaurant_id,
        name: "Soup".to_string(),
        price: Price::new(Decimal::new(500, 2)).unwrap(),
    }
}

/// Real Restaurant actor over an in-memory store, with the Menu and Order
/// actors mocked: deleting a restaurant must evict its rows from both.
#[tokio::test]
async fn test_delete_evicts_menu_and_orders() {
    let store = Arc::new(MemoryStore::new());

    let mut menu_mock = MockClient::<MenuItem>::new();
    menu_mock.expect_retain().return_ok(2);
    let (orders, mut order_requests) = create_mock_client::<Order>(10);

    let (actor, restaurants) = restaurant_actor::restore(Vec::new(), 1);
    let shared: SharedStore = store.clone();
    let handle = tokio::spawn(actor.run(RestaurantContext {
        store: shared,
        menu: menu_mock.client(),
        orders,
    }));
    let client = RestaurantClient::new(restaurants);

    let cafe = client
        .create_restaurant(RestaurantCreate {
            name: "Cafe".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(store.load().await.unwrap().restaurants, vec![cafe.clone()]);

    let delete = {
        let client = client.clone();
        tokio::spawn(async move { client.delete(cafe.id).await })
    };

    let (keep, responder) = expect_retain(&mut order_requests)
        .await
        .expect("Expected Retain request");
    assert!(!keep(&Order::open(OrderId(1), cafe.id, Utc::now())));
    assert!(keep(&Order::open(OrderId(2), RestaurantId(7), Utc::now())));
    responder.send(Ok(1)).unwrap();

    delete.await.unwrap().unwrap();
    assert!(store.load().await.unwrap().restaurants.is_empty());
    assert!(matches!(
        client.require(cafe.id).await,
        Err(RestaurantError::NotFound(_))
    ));
    menu_mock.verify();

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_failed_store_write_keeps_restaurant() {
    let store = Arc::new(MemoryStore::new());
    store
        .insert_restaurant(&Restaurant::new(RestaurantId(1), "Cafe"))
        .await
        .unwrap();
    store
        .insert_menu_item(&soup(1, RestaurantId(1)))
        .await
        .unwrap();
    let snapshot = store.load().await.unwrap();

    // No retain expected: eviction only follows a successful delete
    let menu_mock = MockClient::<MenuItem>::new();
    let order_mock = MockClient::<Order>::new();

    let (actor, restaurants) =
        restaurant_actor::restore(snapshot.restaurants, snapshot.next_ids.restaurant);
    let shared: SharedStore = store.clone();
    let handle = tokio::spawn(actor.run(RestaurantContext {
        store: shared,
        menu: menu_mock.client(),
        orders: order_mock.client(),
    }));
    let client = RestaurantClient::new(restaurants);

    store.set_unavailable(true);
    let result = client.delete(RestaurantId(1)).await;
    assert!(matches!(result, Err(RestaurantError::DatabaseError(_))));
    store.set_unavailable(false);

    assert_eq!(client.require(RestaurantId(1)).await.unwrap().name, "Cafe");
    assert_eq!(store.load().await.unwrap().menu_items.len(), 1);
    menu_mock.verify();
    order_mock.verify();

    drop(client);
    handle.await.unwrap();
}
