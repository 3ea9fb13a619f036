//! Error types for the Restaurant actor.

use crate::model::InvalidInput;
use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur during restaurant operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RestaurantError {
    /// The requested restaurant was not found.
    #[error("Restaurant not found: {0}")]
    NotFound(String),

    /// The restaurant data provided is invalid.
    #[error("Invalid restaurant: {0}")]
    InvalidInput(String),

    /// An underlying database error occurred.
    #[error("Restaurant database error: {0}")]
    DatabaseError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<InvalidInput> for RestaurantError {
    fn from(e: InvalidInput) -> Self {
        RestaurantError::InvalidInput(e.0)
    }
}

impl From<StoreError> for RestaurantError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => RestaurantError::NotFound(id),
            other => RestaurantError::DatabaseError(other.to_string()),
        }
    }
}
