//! Custom actions for the Order actor: the lock transition and the item
//! ledger.

use crate::model::{OrderItem, OrderItemDraft, OrderItemId, OrderItemPatch, OrderState};

/// Operations on one order beyond plain CRUD.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// open -> locked. Re-locking is a no-op.
    Lock,
    AddItem(OrderItemDraft),
    EditItem(OrderItemId, OrderItemPatch),
    RemoveItem(OrderItemId),
}

/// Result of an [`OrderAction`], one variant per action.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    Locked(OrderState),
    Item(OrderItem),
    Removed(OrderItemId),
}
