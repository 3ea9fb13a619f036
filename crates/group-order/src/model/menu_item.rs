//! Menu catalog entries.
//!
//! A `MenuItem` belongs to exactly one restaurant. Order items copy the
//! name and price they were placed with, so editing or deleting a menu
//! item never changes an existing order.

use crate::model::{Price, PriceInput, RestaurantId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for MenuItems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(pub u32);

impl From<u32> for MenuItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "menu_item_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub price: Price,
}

/// Request body for adding a menu item; the restaurant comes from the path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuItemDraft {
    #[serde(default)]
    pub name: String,
    pub price: Option<PriceInput>,
}

/// Payload for creating a new menu item.
#[derive(Debug, Clone)]
pub struct MenuItemCreate {
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub price: Option<PriceInput>,
}

impl MenuItemCreate {
    pub fn new(restaurant_id: RestaurantId, draft: MenuItemDraft) -> Self {
        Self {
            restaurant_id,
            name: draft.name,
            price: draft.price,
        }
    }
}

/// Partial update: absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub price: Option<PriceInput>,
}
