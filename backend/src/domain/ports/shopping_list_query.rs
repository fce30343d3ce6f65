//! Driving port for reading the shopping list.

use async_trait::async_trait;

use crate::domain::{Error, ShoppingList};

/// Use-case port consumed by the list endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingListQuery: Send + Sync {
    /// Load the partitioned list with display annotations.
    async fn shopping_list(&self) -> Result<ShoppingList, Error>;
}
