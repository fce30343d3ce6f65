//! Driven port for item persistence.

use async_trait::async_trait;

use crate::domain::{Item, ItemId, NewItem, QuantityAdjustment};

/// Errors raised by item repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemRepositoryError {
    /// A connection could not be checked out or was lost.
    #[error("item repository connection failed: {message}")]
    Connection { message: String },
    /// The statement failed during execution.
    #[error("item repository query failed: {message}")]
    Query { message: String },
}

impl ItemRepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for the `items` table.
///
/// Every method maps to exactly one statement. Methods addressing a single
/// row report whether a row was affected; a missing id is not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Fetch all items ordered by purchased, category, then name.
    async fn list_items(&self) -> Result<Vec<Item>, ItemRepositoryError>;

    /// Insert a new, unpurchased item and return its identifier.
    async fn insert_item(&self, item: &NewItem) -> Result<ItemId, ItemRepositoryError>;

    /// Step the quantity by one, never going below one.
    async fn adjust_quantity(
        &self,
        id: ItemId,
        adjustment: QuantityAdjustment,
    ) -> Result<bool, ItemRepositoryError>;

    /// Flip the purchased flag in place.
    async fn toggle_purchased(&self, id: ItemId) -> Result<bool, ItemRepositoryError>;

    /// Remove the row.
    async fn delete_item(&self, id: ItemId) -> Result<bool, ItemRepositoryError>;
}
