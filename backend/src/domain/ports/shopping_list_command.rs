//! Driving port for shopping-list mutations.
//!
//! Inbound adapters hand over raw input; validation happens behind the port
//! so every transport applies the same rules.

use async_trait::async_trait;

use crate::domain::{Error, ItemId, ItemValidationError, QuantityAdjustment};

/// Raw create-form values as received from the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddItemRequest {
    pub name: String,
    pub quantity: String,
    pub category: String,
}

/// Result of a create attempt that did not hit a store failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddItemOutcome {
    /// The item was stored under the given identifier.
    Added(ItemId),
    /// Input failed validation and nothing was written.
    Rejected(ItemValidationError),
}

/// Use-case port consumed by the mutating endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingListCommand: Send + Sync {
    /// Validate and insert a new item.
    async fn add_item(&self, request: AddItemRequest) -> Result<AddItemOutcome, Error>;

    /// Increase or decrease an item's quantity by one.
    async fn adjust_quantity(
        &self,
        id: ItemId,
        adjustment: QuantityAdjustment,
    ) -> Result<(), Error>;

    /// Flip an item between pending and purchased.
    async fn toggle_purchased(&self, id: ItemId) -> Result<(), Error>;

    /// Delete an item; unknown ids succeed.
    async fn delete_item(&self, id: ItemId) -> Result<(), Error>;
}
