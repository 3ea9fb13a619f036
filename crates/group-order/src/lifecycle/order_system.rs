use crate::clients::{MenuClient, OrderClient, RestaurantClient};
use crate::order_actor::OrderContext;
use crate::restaurant_actor::RestaurantContext;
use crate::store::{SharedStore, StoreError};
use crate::{menu_actor, order_actor, restaurant_actor};
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// The runtime orchestrator for the group-ordering service.
///
/// `OrderSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping all actors
/// - **Dependency Wiring**: handing each actor its context
/// - **Recovery**: seeding every actor from the durable store
///
/// # Architecture
///
/// - **Restaurant Actor**: restaurants; deletion evicts dependents
/// - **Menu Actor**: menu items of every restaurant
/// - **Order Actor**: group orders, their status and their items
pub struct OrderSystem {
    /// Client for interacting with the Restaurant actor
    pub restaurant_client: RestaurantClient,

    /// Client for interacting with the Menu actor
    pub menu_client: MenuClient,

    /// Client for interacting with the Order actor
    pub order_client: OrderClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl OrderSystem {
    /// Loads the store's contents and starts every actor on top of them.
    ///
    /// # Errors
    ///
    /// Returns the store error if the snapshot cannot be loaded.
    pub async fn start(store: SharedStore) -> Result<Self, StoreError> {
        let snapshot = store.load().await?;
        info!(
            restaurants = snapshot.restaurants.len(),
            menu_items = snapshot.menu_items.len(),
            orders = snapshot.orders.len(),
            "Starting order system"
        );

        // 1. Create actors (no dependencies)
        let next = snapshot.next_ids;
        let order_context = OrderContext::new(store.clone(), next.order_item);
        let (restaurant_actor, restaurants) =
            restaurant_actor::restore(snapshot.restaurants, next.restaurant);
        let (menu_actor, menu) = menu_actor::restore(snapshot.menu_items, next.menu_item);
        let (order_actor, orders) = order_actor::restore(snapshot.orders, next.order);

        // 2. Start actors with injected context
        let menu_handle = tokio::spawn(menu_actor.run(store.clone()));
        let order_handle = tokio::spawn(order_actor.run(order_context));
        let restaurant_handle = tokio::spawn(restaurant_actor.run(RestaurantContext {
            store,
            menu: menu.clone(),
            orders: orders.clone(),
        }));

        let restaurant_client = RestaurantClient::new(restaurants);
        Ok(Self {
            menu_client: MenuClient::new(menu, restaurant_client.clone()),
            order_client: OrderClient::new(orders, restaurant_client.clone()),
            restaurant_client,
            handles: vec![restaurant_handle, menu_handle, order_handle],
        })
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Drops all clients, which closes the actors' channels, then waits for
    /// every actor task. Fails if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down system...");

        drop(self.order_client);
        drop(self.menu_client);
        drop(self.restaurant_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e);
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
