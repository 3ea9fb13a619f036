//! # Group Order Library
//!
//! A group-ordering coordinator: restaurants, their menus, and shared
//! orders that several people fill in before the orderer locks them.
//!
//! - **[model]**: Domain types and input validation.
//! - **[store]**: Durable storage behind the [`Store`](store::Store) trait (Postgres or in-memory).
//! - **[restaurant_actor], [menu_actor], [order_actor]**: One `ResourceActor` per resource.
//! - **[clients]**: Typed wrappers over the actors' channels.
//! - **[lifecycle]**: Startup from storage, shutdown, tracing setup.
//! - **[api]**: The axum HTTP surface.
//! - **[config]**: Environment configuration.

pub mod api;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
pub mod order_actor;
pub mod restaurant_actor;
pub mod store;
