//! Represents a restaurant that group orders are placed with.
//!
//! # Actor Framework
//! This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
//!
//! See [`impl ActorEntity for Restaurant`](#impl-ActorEntity-for-Restaurant) for details on:
//! - Creation parameters ([`RestaurantCreate`])
//! - Update parameters ([`RestaurantUpdate`])

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Restaurants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantId(pub u32);

impl From<u32> for RestaurantId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for RestaurantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "restaurant_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
}

impl Restaurant {
    pub fn new(id: RestaurantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Payload for creating a new restaurant.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestaurantCreate {
    #[serde(default)]
    pub name: String,
}

/// Payload for renaming a restaurant. An absent name keeps the current one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
}
