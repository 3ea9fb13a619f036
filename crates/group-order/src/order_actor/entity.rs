//! Entity trait implementation for the Order domain type: the order state
//! machine and its item ledger.
//!
//! The Order actor processes one request at a time, so each hook below is
//! an uninterrupted read-check-write against the order it was given. The
//! store re-checks the lock inside its own transaction as well, and the
//! framework only commits the staged order once the hook returned `Ok`.
//!
//! | Operation | open | locked |
//! |---|---|---|
//! | `Lock` | -> locked | no-op |
//! | update (orderer) | allowed | `Forbidden` |
//! | delete (cancel) | allowed | `Forbidden` |
//! | `AddItem` / `EditItem` / `RemoveItem` | allowed | `Forbidden` |

use super::{OrderAction, OrderActionResult, OrderContext, OrderError};
use crate::model::{
    Order, OrderCreate, OrderId, OrderItemId, OrderState, OrderStatus, OrdererUpdate,
};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

impl Order {
    fn ensure_open(&self) -> Result<(), OrderError> {
        if self.is_locked() {
            return Err(OrderError::locked(self.id));
        }
        Ok(())
    }

    fn item_position(&self, item_id: OrderItemId) -> Result<usize, OrderError> {
        self.items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| OrderError::NotFound(item_id.to_string()))
    }

    fn state(&self) -> OrderState {
        OrderState {
            id: self.id,
            status: self.status,
        }
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrdererUpdate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = OrderContext;
    type Error = OrderError;

    fn id(&self) -> OrderId {
        self.id
    }

    /// A new order is always open, with the sentinel orderer.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        Ok(Order::open(id, params.restaurant_id, Utc::now()))
    }

    /// Fails with `Conflict` if the restaurant already has an open order
    /// and with `NotFound` if the restaurant is gone.
    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), Self::Error> {
        ctx.store.insert_order(self).await?;
        Ok(())
    }

    /// Names the person placing the order.
    async fn on_update(&mut self, update: OrdererUpdate, ctx: &OrderContext) -> Result<(), Self::Error> {
        self.ensure_open()?;
        let orderer_name = update.validate()?;
        ctx.store.set_orderer(self.id, &orderer_name).await?;
        self.orderer_name = orderer_name;
        Ok(())
    }

    /// Cancels the order. Only open orders can be cancelled.
    async fn on_delete(&self, ctx: &OrderContext) -> Result<(), Self::Error> {
        self.ensure_open()?;
        ctx.store.delete_order(self.id).await?;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<OrderActionResult, Self::Error> {
        match action {
            OrderAction::Lock => {
                if self.status == OrderStatus::Open {
                    ctx.store.lock_order(self.id).await?;
                    self.status = OrderStatus::Locked;
                } else {
                    debug!(order_id = %self.id, "Already locked");
                }
                Ok(OrderActionResult::Locked(self.state()))
            }
            OrderAction::AddItem(draft) => {
                self.ensure_open()?;
                let item = draft.validate()?.into_item(ctx.item_ids.next(), self.id);
                ctx.store.insert_order_item(&item).await?;
                self.items.push(item.clone());
                Ok(OrderActionResult::Item(item))
            }
            OrderAction::EditItem(item_id, patch) => {
                let position = self.item_position(item_id)?;
                self.ensure_open()?;
                let edited = patch.apply(&self.items[position])?;
                ctx.store.update_order_item(&edited).await?;
                self.items[position] = edited.clone();
                Ok(OrderActionResult::Item(edited))
            }
            OrderAction::RemoveItem(item_id) => {
                let position = self.item_position(item_id)?;
                self.ensure_open()?;
                ctx.store.delete_order_item(item_id).await?;
                self.items.remove(position);
                Ok(OrderActionResult::Removed(item_id))
            }
        }
    }
}
