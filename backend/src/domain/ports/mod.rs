//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports (`ShoppingListQuery`, `ShoppingListCommand`) are what inbound
//! adapters call; the driven `ItemRepository` port is what persistence
//! adapters implement. Driven ports return typed errors so adapters map their
//! failures into predictable variants.

mod item_repository;
mod shopping_list_command;
mod shopping_list_query;

#[cfg(test)]
pub use item_repository::MockItemRepository;
pub use item_repository::{ItemRepository, ItemRepositoryError};
#[cfg(test)]
pub use shopping_list_command::MockShoppingListCommand;
pub use shopping_list_command::{AddItemOutcome, AddItemRequest, ShoppingListCommand};
#[cfg(test)]
pub use shopping_list_query::MockShoppingListQuery;
pub use shopping_list_query::ShoppingListQuery;
