//! Domain primitives, ports and services.
//!
//! Purpose: define the shopping-list types used by the HTTP and persistence
//! adapters. Types validate on construction and document their invariants in
//! Rustdoc.
//!
//! Public surface:
//! - Category registry (`Category`, `is_valid_category`, `color_class_for`).
//! - Item values (`Item`, `NewItem`, `ItemId`, `ItemName`, `Quantity`,
//!   `QuantityAdjustment`).
//! - Read model (`ShoppingList`, `ListedItem`).
//! - Error (`Error`, `ErrorCode`) and the request `TraceId`.
//! - `ShoppingListService` implementing the driving ports.

pub mod category;
pub mod error;
pub mod item;
pub mod ports;
pub mod shopping_list;
pub mod shopping_list_service;
pub mod trace_id;

pub use self::category::{
    Category, DEFAULT_COLOR_CLASS, category_labels, color_class_for, is_valid_category,
};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::item::{
    Item, ItemId, ItemName, ItemValidationError, NewItem, Quantity, QuantityAdjustment,
};
pub use self::shopping_list::{ListedItem, ShoppingList};
pub use self::shopping_list_service::ShoppingListService;
pub use self::trace_id::TraceId;
