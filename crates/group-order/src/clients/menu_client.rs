//! # Menu Client
//!
//! Provides a high‑level API for interacting with the `MenuItem` actor.
//! Adding an item first checks the restaurant through the Restaurant actor.
use crate::clients::RestaurantClient;
use crate::menu_actor::MenuError;
use crate::model::{MenuItem, MenuItemCreate, MenuItemDraft, MenuItemId, MenuItemUpdate, RestaurantId};
use crate::restaurant_actor::RestaurantError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Menu actor.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
    restaurants: RestaurantClient,
}

impl MenuClient {
    pub fn new(inner: ResourceClient<MenuItem>, restaurants: RestaurantClient) -> Self {
        Self { inner, restaurants }
    }
}

#[async_trait]
impl ActorClient<MenuItem> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError<MenuError>) -> Self::Error {
        match e {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(id) => MenuError::NotFound(id),
            other => MenuError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn from_restaurant(e: RestaurantError) -> MenuError {
    match e {
        RestaurantError::NotFound(id) => MenuError::NotFound(id),
        other => MenuError::ActorCommunicationError(other.to_string()),
    }
}

impl MenuClient {
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        restaurant_id: RestaurantId,
        draft: MenuItemDraft,
    ) -> Result<MenuItem, MenuError> {
        debug!("add_item called");
        self.restaurants
            .require(restaurant_id)
            .await
            .map_err(from_restaurant)?;

        let id = self
            .inner
            .create(MenuItemCreate::new(restaurant_id, draft))
            .await
            .map_err(Self::map_error)?;
        self.get(id)
            .await?
            .ok_or_else(|| MenuError::NotFound(id.to_string()))
    }

    /// The restaurant's menu, in creation order. Unknown restaurants have
    /// an empty menu.
    #[instrument(skip(self))]
    pub async fn menu(&self, restaurant_id: RestaurantId) -> Result<Vec<MenuItem>, MenuError> {
        self.inner
            .list_where(move |item| item.restaurant_id == restaurant_id)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        id: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, MenuError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}
