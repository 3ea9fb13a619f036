//! Error types for the Order actor.

use crate::model::{InvalidInput, OrderId};
use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur during order operations.
///
/// Checks run in a fixed order: an unknown target is `NotFound` before a
/// locked order is `Forbidden`, which comes before bad input is
/// `InvalidInput`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The order, order item or restaurant was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The order exists but its state forbids the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A required field is missing or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The store refused a write because of a uniqueness rule.
    #[error("Order conflict: {0}")]
    Conflict(String),

    /// An underlying database error occurred.
    #[error("Order database error: {0}")]
    DatabaseError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    pub fn locked(id: OrderId) -> Self {
        OrderError::Forbidden(format!("{id} is locked"))
    }
}

impl From<InvalidInput> for OrderError {
    fn from(e: InvalidInput) -> Self {
        OrderError::InvalidInput(e.0)
    }
}

impl From<StoreError> for OrderError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => OrderError::NotFound(id),
            StoreError::OrderLocked(id) => OrderError::locked(id),
            StoreError::Conflict(msg) => OrderError::Conflict(msg),
            StoreError::Backend(msg) => OrderError::DatabaseError(msg),
        }
    }
}
