//! # ActorEntity Trait
//!
//! The contract a resource type implements to be managed by a
//! [`ResourceActor`](crate::ResourceActor): associated types for ids, DTOs,
//! actions, context and errors, plus async lifecycle hooks.
//!
//! # Hooks and persistence
//! Hooks receive the actor's `Context`, which is where dependencies such as
//! a durable store or other actors' clients live. A hook that returns an
//! error aborts the operation:
//! - `on_create` failing means the entity is never inserted.
//! - `on_update`/`handle_action` run on a staged copy, which is discarded
//!   on failure.
//! - `on_delete` failing keeps the entity in place.
//!
//! This makes "write to the store first, then commit in memory" the natural
//! way to implement an entity.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` to allow asynchronous operations in hooks
/// (e.g., writing to a database or calling other actors). The `Context` is
/// injected into every hook at `run()` time ("late binding").
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation, and ordered
    /// so listings come back in creation order.
    type Id: Ord + Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance (DTO - Data Transfer Object).
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations.
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per actor rather than one per message: clients deal with a
    /// single error type and match on its variants.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identifier of this instance.
    fn id(&self) -> Self::Id;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received. Runs on a staged copy.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action. Runs on a staged copy.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
