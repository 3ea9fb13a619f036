//! # Actor Framework
//!
//! Building blocks for type-safe actors that own a table of resources and
//! serve CRUD + custom actions over a Tokio mailbox.
//!
//! ## Why actors
//!
//! - **Isolated state**: each `ResourceActor` exclusively owns its table.
//! - **Sequential processing**: requests are handled one at a time, so a
//!   read-check-write inside a hook is atomic with respect to every other
//!   request to the same actor. No `Mutex` around the table.
//! - **Parallelism across resources**: different actors run in different
//!   tasks.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): the business rules, expressed as hooks.
//! 2. **Runtime** ([`ResourceActor`]): the message loop, id generation and
//!    staged writes.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed async
//!    calls; entity errors come back as [`FrameworkError::Entity`].
//!
//! ## Context injection
//!
//! Dependencies are injected when the actor is *run*, not when it is built:
//!
//! ```rust,ignore
//! let (restaurant_actor, restaurants) = ResourceActor::<Restaurant>::new(32);
//! let (menu_actor, menu) = ResourceActor::<MenuItem>::new(32);
//!
//! tokio::spawn(menu_actor.run(store.clone()));
//! // Deleting a restaurant needs to evict its menu items.
//! tokio::spawn(restaurant_actor.run(RestaurantContext { store, menu }));
//! ```
//!
//! This lets actors reference each other's clients without construction
//! cycles, as long as no two actors wait on each other inside a hook.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient` from scripted
//! expectations, so client wrappers can be tested without actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
