//! # Menu Actor
//!
//! Owns every restaurant's menu items. Items are keyed by their own id;
//! per-restaurant listings are filtered scans.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::MenuItem;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a Menu actor seeded with `items`, and its client. New ids start
/// at `next_id`.
pub fn restore(
    items: Vec<MenuItem>,
    next_id: u32,
) -> (ResourceActor<MenuItem>, ResourceClient<MenuItem>) {
    ResourceActor::restore(32, items, next_id)
}
