//! # Order Client
//!
//! Provides a high‑level API for interacting with the `Order` actor: the
//! get-or-create of a restaurant's open order, the item ledger, locking and
//! the order history.
use crate::clients::RestaurantClient;
use crate::model::{
    Order, OrderCreate, OrderId, OrderItem, OrderItemDraft, OrderItemId, OrderItemPatch,
    OrderState, OrderStatus, OrderSummary, OrdererUpdate, RestaurantId,
};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use crate::restaurant_actor::RestaurantError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::cmp::Reverse;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    restaurants: RestaurantClient,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, restaurants: RestaurantClient) -> Self {
        Self { inner, restaurants }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError<OrderError>) -> Self::Error {
        match e {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn from_restaurant(e: RestaurantError) -> OrderError {
    match e {
        RestaurantError::NotFound(id) => OrderError::NotFound(id),
        other => OrderError::ActorCommunicationError(other.to_string()),
    }
}

fn unexpected(result: OrderActionResult) -> OrderError {
    OrderError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

impl OrderClient {
    /// Returns the restaurant's open order, opening one if there is none.
    ///
    /// Two callers racing to open the first order both end up with the same
    /// order: the store refuses the second insert with a conflict and the
    /// loser re-reads the winner's order.
    ///
    /// The lookup reads the Order actor's table, not the store. The table
    /// mirrors the store only while this service is the database's sole
    /// writer; the store's one-open-order rule still backs the insert.
    #[instrument(skip(self))]
    pub async fn open_order(&self, restaurant_id: RestaurantId) -> Result<Order, OrderError> {
        self.restaurants
            .require(restaurant_id)
            .await
            .map_err(from_restaurant)?;

        if let Some(order) = self.find_open(restaurant_id).await? {
            return Ok(order);
        }

        match self.inner.create(OrderCreate { restaurant_id }).await {
            Ok(id) => {
                info!(order_id = %id, "Opened order");
                self.get_order(id).await
            }
            Err(FrameworkError::Entity(OrderError::Conflict(msg))) => {
                debug!(%msg, "Lost open-order race, re-reading");
                self.find_open(restaurant_id)
                    .await?
                    .ok_or(OrderError::Conflict(msg))
            }
            Err(e) => Err(Self::map_error(e)),
        }
    }

    async fn find_open(&self, restaurant_id: RestaurantId) -> Result<Option<Order>, OrderError> {
        let open = self
            .inner
            .list_where(move |order| {
                order.restaurant_id == restaurant_id && order.status == OrderStatus::Open
            })
            .await
            .map_err(Self::map_error)?;
        Ok(open.into_iter().next())
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// Order history, most recent first. Open orders without items are
    /// hidden.
    #[instrument(skip(self))]
    pub async fn history(&self) -> Result<Vec<OrderSummary>, OrderError> {
        let mut orders = self
            .inner
            .list_where(Order::is_listed)
            .await
            .map_err(Self::map_error)?;
        orders.sort_by_key(|order| Reverse((order.created_at, order.id)));

        let names = self.restaurants.names().await.map_err(from_restaurant)?;
        Ok(orders
            .into_iter()
            // a restaurant deleted mid-listing takes its orders with it
            .filter_map(|order| {
                let restaurant_name = names.get(&order.restaurant_id)?.clone();
                Some(OrderSummary {
                    order,
                    restaurant_name,
                })
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        order_id: OrderId,
        draft: OrderItemDraft,
    ) -> Result<OrderItem, OrderError> {
        debug!("Sending request");
        match self.act(order_id, OrderAction::AddItem(draft)).await? {
            OrderActionResult::Item(item) => Ok(item),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn edit_item(
        &self,
        item_id: OrderItemId,
        patch: OrderItemPatch,
    ) -> Result<OrderItem, OrderError> {
        let order_id = self.order_of(item_id).await?;
        match self.act(order_id, OrderAction::EditItem(item_id, patch)).await? {
            OrderActionResult::Item(item) => Ok(item),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, item_id: OrderItemId) -> Result<(), OrderError> {
        let order_id = self.order_of(item_id).await?;
        match self.act(order_id, OrderAction::RemoveItem(item_id)).await? {
            OrderActionResult::Removed(_) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Locks the order. Locking a locked order returns its state unchanged.
    #[instrument(skip(self))]
    pub async fn lock(&self, order_id: OrderId) -> Result<OrderState, OrderError> {
        match self.act(order_id, OrderAction::Lock).await? {
            OrderActionResult::Locked(state) => Ok(state),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_orderer(
        &self,
        order_id: OrderId,
        update: OrdererUpdate,
    ) -> Result<Order, OrderError> {
        self.inner
            .update(order_id, update)
            .await
            .map_err(Self::map_error)
    }

    /// Cancels (deletes) an open order with all its items.
    #[instrument(skip(self))]
    pub async fn cancel(&self, order_id: OrderId) -> Result<(), OrderError> {
        self.delete(order_id).await
    }

    async fn act(
        &self,
        order_id: OrderId,
        action: OrderAction,
    ) -> Result<OrderActionResult, OrderError> {
        self.inner
            .perform_action(order_id, action)
            .await
            .map_err(Self::map_error)
    }

    /// The order an item belongs to. Items never move between orders, so
    /// the answer stays valid; the action itself re-checks that the item
    /// is still there.
    async fn order_of(&self, item_id: OrderItemId) -> Result<OrderId, OrderError> {
        let owners = self
            .inner
            .list_where(move |order| order.item(item_id).is_some())
            .await
            .map_err(Self::map_error)?;
        owners
            .first()
            .map(|order| order.id)
            .ok_or_else(|| OrderError::NotFound(item_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Restaurant;
    use actor_framework::mock::MockClient;
    use chrono::Utc;

    fn clients() -> (MockClient<Order>, MockClient<Restaurant>) {
        let mut restaurants = MockClient::<Restaurant>::new();
        restaurants
            .expect_get(RestaurantId(1))
            .return_ok(Some(Restaurant::new(RestaurantId(1), "Cafe")));
        (MockClient::<Order>::new(), restaurants)
    }

    fn open(id: u32) -> Order {
        Order::open(OrderId(id), RestaurantId(1), Utc::now())
    }

    #[tokio::test]
    async fn test_open_order_reuses_existing_open_order() {
        let (mut orders, restaurants) = clients();
        orders.expect_list().return_ok(vec![open(5)]);

        let client = OrderClient::new(orders.client(), RestaurantClient::new(restaurants.client()));
        let order = client.open_order(RestaurantId(1)).await.unwrap();

        assert_eq!(order.id, OrderId(5));
        orders.verify();
        restaurants.verify();
    }

    #[tokio::test]
    async fn test_open_order_loser_rereads_winner() {
        let (mut orders, restaurants) = clients();
        orders.expect_list().return_ok(vec![]);
        orders
            .expect_create()
            .return_err(FrameworkError::Entity(OrderError::Conflict(
                "restaurant_1 already has an open order".into(),
            )));
        orders.expect_list().return_ok(vec![open(7)]);

        let client = OrderClient::new(orders.client(), RestaurantClient::new(restaurants.client()));
        let order = client.open_order(RestaurantId(1)).await.unwrap();

        assert_eq!(order.id, OrderId(7));
        orders.verify();
    }

    #[tokio::test]
    async fn test_open_order_for_unknown_restaurant_is_not_found() {
        let mut restaurants = MockClient::<Restaurant>::new();
        restaurants.expect_get(RestaurantId(2)).return_ok(None);
        let orders = MockClient::<Order>::new();

        let client = OrderClient::new(orders.client(), RestaurantClient::new(restaurants.client()));
        let result = client.open_order(RestaurantId(2)).await;

        assert!(matches!(result, Err(OrderError::NotFound(_))));
        orders.verify();
    }

    #[tokio::test]
    async fn test_edit_unknown_item_is_not_found() {
        let mut orders = MockClient::<Order>::new();
        orders.expect_list().return_ok(vec![]);
        let restaurants = MockClient::<Restaurant>::new();

        let client = OrderClient::new(orders.client(), RestaurantClient::new(restaurants.client()));
        let result = client
            .edit_item(OrderItemId(42), OrderItemPatch::default())
            .await;

        assert_eq!(result, Err(OrderError::NotFound("order_item_42".into())));
    }

    #[tokio::test]
    async fn test_lock_maps_forbidden_and_mismatched_results() {
        let mut orders = MockClient::<Order>::new();
        orders
            .expect_action(OrderId(1))
            .return_err(FrameworkError::Entity(OrderError::locked(OrderId(1))));
        orders
            .expect_action(OrderId(1))
            .return_ok(OrderActionResult::Removed(OrderItemId(1)));
        let restaurants = MockClient::<Restaurant>::new();

        let client = OrderClient::new(orders.client(), RestaurantClient::new(restaurants.client()));
        let draft = OrderItemDraft::default();
        assert!(matches!(
            client.add_item(OrderId(1), draft).await,
            Err(OrderError::Forbidden(_))
        ));
        assert!(matches!(
            client.lock(OrderId(1)).await,
            Err(OrderError::ActorCommunicationError(_))
        ));
        orders.verify();
    }
}
