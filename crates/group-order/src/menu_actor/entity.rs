//! Entity trait implementation for the MenuItem domain type.

use super::MenuError;
use crate::model::{required_text, MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate, Price};
use crate::store::SharedStore;
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemCreate;
    type Update = MenuItemUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = SharedStore;
    type Error = MenuError;

    fn id(&self) -> MenuItemId {
        self.id
    }

    fn from_create_params(id: MenuItemId, params: MenuItemCreate) -> Result<Self, Self::Error> {
        Ok(MenuItem {
            id,
            restaurant_id: params.restaurant_id,
            name: required_text("name", &params.name)?,
            price: Price::parse(params.price.as_ref())?,
        })
    }

    /// Fails with `NotFound` when the restaurant row is gone.
    async fn on_create(&mut self, store: &SharedStore) -> Result<(), Self::Error> {
        store.insert_menu_item(self).await?;
        Ok(())
    }

    async fn on_update(&mut self, update: MenuItemUpdate, store: &SharedStore) -> Result<(), Self::Error> {
        if let Some(name) = &update.name {
            self.name = required_text("name", name)?;
        }
        if let Some(price) = &update.price {
            self.price = Price::parse(Some(price))?;
        }
        store.update_menu_item(self).await?;
        Ok(())
    }

    async fn on_delete(&self, store: &SharedStore) -> Result<(), Self::Error> {
        store.delete_menu_item(self.id).await?;
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _store: &SharedStore) -> Result<(), Self::Error> {
        Ok(())
    }
}
