//! Group orders and their line items.
//!
//! An [`Order`] starts `open`, collects [`OrderItem`]s from any number of
//! participants and is eventually `locked`, after which its items, orderer
//! and status are frozen. The state rules themselves are enforced by the
//! order ledger actor; the types here only describe the data and the pure
//! input transformations.

use crate::model::{optional_text, required_text, InvalidInput, Price, PriceInput, RestaurantId};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Orderer label of a freshly opened order.
pub const ORDERER_SENTINEL: &str = "Undecided";

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Type-safe identifier for OrderItems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderItemId(pub u32);

impl From<u32> for OrderItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_item_{}", self.0)
    }
}

/// `open` is initial, `locked` is terminal. There is no unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Locked,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "open",
            OrderStatus::Locked => "locked",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(OrderStatus::Open),
            "locked" => Ok(OrderStatus::Locked),
            other => Err(InvalidInput(format!("unknown order status {other:?}"))),
        }
    }
}

/// One participant's line on a group order.
///
/// `item_name` and `price` are copied from the menu (or typed freely) when
/// the item is added; they do not reference the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub user_name: String,
    pub item_name: String,
    pub notes: Option<String>,
    pub price: Price,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub restaurant_id: RestaurantId,
    pub orderer_name: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// A new open order with the sentinel orderer and no items.
    ///
    /// `created_at` is truncated to microseconds, the resolution of the
    /// `TIMESTAMPTZ` column, so a reloaded order compares equal.
    pub fn open(id: OrderId, restaurant_id: RestaurantId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            restaurant_id,
            orderer_name: ORDERER_SENTINEL.to_string(),
            created_at: created_at.trunc_subsecs(6),
            status: OrderStatus::Open,
            items: Vec::new(),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.status == OrderStatus::Locked
    }

    /// Whether the order shows up in the order history. Open orders nobody
    /// added to are hidden.
    pub fn is_listed(&self) -> bool {
        self.is_locked() || !self.items.is_empty()
    }

    pub fn item(&self, id: OrderItemId) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Payload for opening a new order.
#[derive(Debug, Clone, Copy)]
pub struct OrderCreate {
    pub restaurant_id: RestaurantId,
}

/// An order joined with the name of its restaurant, as shown in the history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    #[serde(flatten)]
    pub order: Order,
    pub restaurant_name: String,
}

/// Result of a lock request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderState {
    pub id: OrderId,
    pub status: OrderStatus,
}

/// Request body for adding an item to an order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderItemDraft {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub item_name: String,
    pub notes: Option<String>,
    pub price: Option<PriceInput>,
}

/// A validated [`OrderItemDraft`], ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub user_name: String,
    pub item_name: String,
    pub notes: Option<String>,
    pub price: Price,
}

impl OrderItemDraft {
    pub fn validate(&self) -> Result<NewOrderItem, InvalidInput> {
        Ok(NewOrderItem {
            user_name: required_text("user_name", &self.user_name)?,
            item_name: required_text("item_name", &self.item_name)?,
            notes: optional_text("notes", self.notes.as_deref())?,
            price: Price::parse(self.price.as_ref())?,
        })
    }
}

impl NewOrderItem {
    pub fn into_item(self, id: OrderItemId, order_id: OrderId) -> OrderItem {
        OrderItem {
            id,
            order_id,
            user_name: self.user_name,
            item_name: self.item_name,
            notes: self.notes,
            price: self.price,
        }
    }
}

/// Partial edit of an order item. Absent fields keep their value; an empty
/// `notes` string clears the notes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderItemPatch {
    pub user_name: Option<String>,
    pub item_name: Option<String>,
    pub notes: Option<String>,
    pub price: Option<PriceInput>,
}

impl OrderItemPatch {
    /// Returns the edited copy of `item`.
    pub fn apply(&self, item: &OrderItem) -> Result<OrderItem, InvalidInput> {
        let mut edited = item.clone();
        if let Some(user_name) = &self.user_name {
            edited.user_name = required_text("user_name", user_name)?;
        }
        if let Some(item_name) = &self.item_name {
            edited.item_name = required_text("item_name", item_name)?;
        }
        if let Some(notes) = &self.notes {
            edited.notes = optional_text("notes", Some(notes))?;
        }
        if let Some(price) = &self.price {
            edited.price = Price::parse(Some(price))?;
        }
        Ok(edited)
    }
}

/// Request body for naming the person who places the order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrdererUpdate {
    #[serde(alias = "name")]
    pub orderer_name: Option<String>,
}

impl OrdererUpdate {
    pub fn validate(&self) -> Result<String, InvalidInput> {
        required_text("orderer_name", self.orderer_name.as_deref().unwrap_or_default())
    }
}
