//! Shopping-list use-case service.
//!
//! Implements the driving ports on top of an [`ItemRepository`]. Validation
//! failures on the create path are returned as an outcome rather than an
//! error; repository failures become internal errors carrying the adapter
//! message for logging.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    AddItemOutcome, AddItemRequest, ItemRepository, ItemRepositoryError, ShoppingListCommand,
    ShoppingListQuery,
};
use crate::domain::{Error, ItemId, NewItem, QuantityAdjustment, ShoppingList};

/// Service implementing [`ShoppingListQuery`] and [`ShoppingListCommand`].
#[derive(Clone)]
pub struct ShoppingListService<R> {
    items: Arc<R>,
}

impl<R> ShoppingListService<R> {
    /// Create a service over the given repository.
    pub fn new(items: Arc<R>) -> Self {
        Self { items }
    }
}

fn map_repository_error(error: ItemRepositoryError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl<R> ShoppingListQuery for ShoppingListService<R>
where
    R: ItemRepository,
{
    async fn shopping_list(&self) -> Result<ShoppingList, Error> {
        let items = self
            .items
            .list_items()
            .await
            .map_err(map_repository_error)?;
        Ok(ShoppingList::from_items(items))
    }
}

#[async_trait]
impl<R> ShoppingListCommand for ShoppingListService<R>
where
    R: ItemRepository,
{
    async fn add_item(&self, request: AddItemRequest) -> Result<AddItemOutcome, Error> {
        let new_item = match NewItem::try_from_parts(
            &request.name,
            &request.quantity,
            &request.category,
        ) {
            Ok(item) => item,
            Err(reason) => {
                debug!(%reason, "create request rejected");
                return Ok(AddItemOutcome::Rejected(reason));
            }
        };

        let id = self
            .items
            .insert_item(&new_item)
            .await
            .map_err(map_repository_error)?;
        debug!(item_id = %id, category = %new_item.category, "item added");
        Ok(AddItemOutcome::Added(id))
    }

    async fn adjust_quantity(
        &self,
        id: ItemId,
        adjustment: QuantityAdjustment,
    ) -> Result<(), Error> {
        let affected = self
            .items
            .adjust_quantity(id, adjustment)
            .await
            .map_err(map_repository_error)?;
        debug!(item_id = %id, action = adjustment.as_str(), affected, "quantity adjusted");
        Ok(())
    }

    async fn toggle_purchased(&self, id: ItemId) -> Result<(), Error> {
        let affected = self
            .items
            .toggle_purchased(id)
            .await
            .map_err(map_repository_error)?;
        debug!(item_id = %id, affected, "purchased flag toggled");
        Ok(())
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), Error> {
        let affected = self
            .items
            .delete_item(id)
            .await
            .map_err(map_repository_error)?;
        debug!(item_id = %id, affected, "item deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "shopping_list_service_tests.rs"]
mod tests;
