//! Error types for the Menu actor.

use crate::model::InvalidInput;
use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur during menu operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    /// The menu item, or the restaurant it belongs to, was not found.
    #[error("Menu item not found: {0}")]
    NotFound(String),

    /// The menu item data provided is invalid.
    #[error("Invalid menu item: {0}")]
    InvalidInput(String),

    /// An underlying database error occurred.
    #[error("Menu database error: {0}")]
    DatabaseError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<InvalidInput> for MenuError {
    fn from(e: InvalidInput) -> Self {
        MenuError::InvalidInput(e.0)
    }
}

impl From<StoreError> for MenuError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => MenuError::NotFound(id),
            other => MenuError::DatabaseError(other.to_string()),
        }
    }
}
