//! # ActorClient Trait
//!
//! Common interface for resource-specific clients: default `get`, `list`
//! and `delete` built on top of a generic `ResourceClient`, with framework
//! errors folded into the resource's own error type.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard operations.
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<Restaurant> for RestaurantClient {
///     type Error = RestaurantError;
///
///     fn inner(&self) -> &ResourceClient<Restaurant> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError<RestaurantError>) -> Self::Error {
///         match e {
///             FrameworkError::Entity(e) => e,
///             FrameworkError::NotFound(id) => RestaurantError::NotFound(id),
///             other => RestaurantError::ActorCommunicationError(other.to_string()),
///         }
///     }
/// }
///
/// // get(), list() and delete() are now available on RestaurantClient.
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError<T::Error>) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity, in id order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
