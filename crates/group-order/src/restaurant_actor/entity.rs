//! Entity trait implementation for the Restaurant domain type.
//!
//! Every hook writes through to the store before the actor commits the
//! change in memory. Deleting a restaurant also evicts its menu items and
//! orders from their actors; the store has already cascaded the rows.

use super::{RestaurantContext, RestaurantError};
use crate::model::{required_text, Restaurant, RestaurantCreate, RestaurantId, RestaurantUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use tracing::{info, warn};

#[async_trait]
impl ActorEntity for Restaurant {
    type Id = RestaurantId;
    type Create = RestaurantCreate;
    type Update = RestaurantUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = RestaurantContext;
    type Error = RestaurantError;

    fn id(&self) -> RestaurantId {
        self.id
    }

    fn from_create_params(id: RestaurantId, params: RestaurantCreate) -> Result<Self, Self::Error> {
        Ok(Restaurant::new(id, required_text("name", &params.name)?))
    }

    async fn on_create(&mut self, ctx: &RestaurantContext) -> Result<(), Self::Error> {
        ctx.store.insert_restaurant(self).await?;
        Ok(())
    }

    /// Renames the restaurant. An absent name keeps the current one and
    /// skips the write.
    async fn on_update(
        &mut self,
        update: RestaurantUpdate,
        ctx: &RestaurantContext,
    ) -> Result<(), Self::Error> {
        let Some(name) = update.name else {
            return Ok(());
        };
        self.name = required_text("name", &name)?;
        ctx.store.update_restaurant(self).await?;
        Ok(())
    }

    async fn on_delete(&self, ctx: &RestaurantContext) -> Result<(), Self::Error> {
        ctx.store.delete_restaurant(self.id).await?;

        let id = self.id;
        match ctx.menu.retain(move |item| item.restaurant_id != id).await {
            Ok(evicted) => info!(restaurant_id = %id, evicted, "Menu items evicted"),
            Err(e) => warn!(restaurant_id = %id, error = %e, "Menu eviction failed"),
        }
        match ctx.orders.retain(move |order| order.restaurant_id != id).await {
            Ok(evicted) => info!(restaurant_id = %id, evicted, "Orders evicted"),
            Err(e) => warn!(restaurant_id = %id, error = %e, "Order eviction failed"),
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &RestaurantContext) -> Result<(), Self::Error> {
        Ok(())
    }
}
