//! # Restaurant Client
//!
//! Provides a high‑level API for interacting with the `Restaurant` actor.
use crate::model::{Restaurant, RestaurantCreate, RestaurantId, RestaurantUpdate};
use crate::restaurant_actor::RestaurantError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Client for interacting with the Restaurant actor.
#[derive(Clone)]
pub struct RestaurantClient {
    inner: ResourceClient<Restaurant>,
}

impl RestaurantClient {
    pub fn new(inner: ResourceClient<Restaurant>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Restaurant> for RestaurantClient {
    type Error = RestaurantError;

    fn inner(&self) -> &ResourceClient<Restaurant> {
        &self.inner
    }

    fn map_error(e: FrameworkError<RestaurantError>) -> Self::Error {
        match e {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(id) => RestaurantError::NotFound(id),
            other => RestaurantError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl RestaurantClient {
    #[instrument(skip(self))]
    pub async fn create_restaurant(
        &self,
        params: RestaurantCreate,
    ) -> Result<Restaurant, RestaurantError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        self.require(id).await
    }

    #[instrument(skip(self))]
    pub async fn update_restaurant(
        &self,
        id: RestaurantId,
        update: RestaurantUpdate,
    ) -> Result<Restaurant, RestaurantError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Fetches a restaurant, turning absence into `NotFound`.
    #[instrument(skip(self))]
    pub async fn require(&self, id: RestaurantId) -> Result<Restaurant, RestaurantError> {
        self.get(id)
            .await?
            .ok_or_else(|| RestaurantError::NotFound(id.to_string()))
    }

    /// Restaurant names by id, for denormalized listings.
    pub async fn names(&self) -> Result<HashMap<RestaurantId, String>, RestaurantError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .map(|restaurant| (restaurant.id, restaurant.name))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::MockClient;

    #[tokio::test]
    async fn test_require_missing_restaurant_is_not_found() {
        let mut mock = MockClient::<Restaurant>::new();
        mock.expect_get(RestaurantId(4)).return_ok(None);

        let client = RestaurantClient::new(mock.client());
        let result = client.require(RestaurantId(4)).await;

        assert!(matches!(result, Err(RestaurantError::NotFound(_))));
        mock.verify();
    }

    #[tokio::test]
    async fn test_create_returns_stored_restaurant() {
        let mut mock = MockClient::<Restaurant>::new();
        mock.expect_create().return_ok(RestaurantId(1));
        mock.expect_get(RestaurantId(1))
            .return_ok(Some(Restaurant::new(RestaurantId(1), "Cafe")));

        let client = RestaurantClient::new(mock.client());
        let created = client
            .create_restaurant(RestaurantCreate {
                name: " Cafe ".into(),
            })
            .await
            .unwrap();

        assert_eq!(created, Restaurant::new(RestaurantId(1), "Cafe"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_entity_errors_pass_through() {
        let mut mock = MockClient::<Restaurant>::new();
        mock.expect_update(RestaurantId(1))
            .return_err(FrameworkError::Entity(RestaurantError::InvalidInput(
                "name is required".into(),
            )));
        mock.expect_delete(RestaurantId(2))
            .return_err(FrameworkError::NotFound("restaurant_2".into()));

        let client = RestaurantClient::new(mock.client());
        let update = client
            .update_restaurant(RestaurantId(1), RestaurantUpdate { name: Some("".into()) })
            .await;
        assert_eq!(
            update,
            Err(RestaurantError::InvalidInput("name is required".into()))
        );

        let delete = client.delete(RestaurantId(2)).await;
        assert_eq!(delete, Err(RestaurantError::NotFound("restaurant_2".into())));
        mock.verify();
    }
}
