//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself. Entity errors are carried
//! through untouched in [`FrameworkError::Entity`], so callers can still
//! match on their own error variants after a round trip through the mailbox.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError<E> {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    Entity(E),
}
