//! Test utilities for the shopping-list crate.
//!
//! Compiled for unit tests and, behind the `test-support` feature, for the
//! integration tests under `tests/`. The in-memory repository mirrors the
//! statement semantics of the Diesel adapter: list ordering by
//! `(purchased, category, name)`, decrease clamped at one, increase past
//! `i32::MAX` failing as an out-of-range query, toggle as a flip and zero-row
//! mutations reported as `false`. Text ordering is byte-wise rather than
//! collation-aware.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{ItemRepository, ItemRepositoryError};
use crate::domain::{Item, ItemId, NewItem, QuantityAdjustment};

#[derive(Debug, Default)]
struct Table {
    next_id: i32,
    rows: Vec<Item>,
}

/// `ItemRepository` backed by a vector behind a mutex.
#[derive(Debug, Default)]
pub struct InMemoryItemRepository {
    table: Mutex<Table>,
}

impl InMemoryItemRepository {
    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.lock().map(|table| table.rows.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored row for `id`, if present.
    pub fn get(&self, id: ItemId) -> Option<Item> {
        self.lock()
            .ok()?
            .rows
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Table>, ItemRepositoryError> {
        self.table
            .lock()
            .map_err(|_| ItemRepositoryError::connection("in-memory table poisoned"))
    }

    fn update<F>(&self, id: ItemId, apply: F) -> Result<bool, ItemRepositoryError>
    where
        F: FnOnce(&mut Item) -> Result<(), ItemRepositoryError>,
    {
        let mut table = self.lock()?;
        match table.rows.iter_mut().find(|item| item.id == id) {
            Some(item) => apply(item).map(|()| true),
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn list_items(&self) -> Result<Vec<Item>, ItemRepositoryError> {
        let mut rows = self.lock()?.rows.clone();
        rows.sort_by(|a, b| {
            (a.purchased, &a.category, &a.name).cmp(&(b.purchased, &b.category, &b.name))
        });
        Ok(rows)
    }

    async fn insert_item(&self, item: &NewItem) -> Result<ItemId, ItemRepositoryError> {
        let mut table = self.lock()?;
        table.next_id += 1;
        let id = ItemId::new(table.next_id)
            .map_err(|err| ItemRepositoryError::query(err.to_string()))?;
        table.rows.push(Item {
            id,
            name: item.name.as_str().to_owned(),
            quantity: item.quantity,
            category: item.category.label().to_owned(),
            purchased: false,
        });
        Ok(id)
    }

    async fn adjust_quantity(
        &self,
        id: ItemId,
        adjustment: QuantityAdjustment,
    ) -> Result<bool, ItemRepositoryError> {
        self.update(id, |item| {
            if adjustment == QuantityAdjustment::Increase && item.quantity.get() == i32::MAX {
                return Err(ItemRepositoryError::query("integer out of range"));
            }
            item.quantity = item.quantity.adjusted(adjustment);
            Ok(())
        })
    }

    async fn toggle_purchased(&self, id: ItemId) -> Result<bool, ItemRepositoryError> {
        self.update(id, |item| {
            item.purchased = !item.purchased;
            Ok(())
        })
    }

    async fn delete_item(&self, id: ItemId) -> Result<bool, ItemRepositoryError> {
        let mut table = self.lock()?;
        let before = table.rows.len();
        table.rows.retain(|item| item.id != id);
        Ok(table.rows.len() != before)
    }
}

/// `ItemRepository` whose every call fails with the configured error.
#[derive(Debug, Clone)]
pub struct FailingItemRepository {
    error: ItemRepositoryError,
}

impl FailingItemRepository {
    pub fn new(error: ItemRepositoryError) -> Self {
        Self { error }
    }
}

impl Default for FailingItemRepository {
    fn default() -> Self {
        Self::new(ItemRepositoryError::connection("database unavailable"))
    }
}

#[async_trait]
impl ItemRepository for FailingItemRepository {
    async fn list_items(&self) -> Result<Vec<Item>, ItemRepositoryError> {
        Err(self.error.clone())
    }

    async fn insert_item(&self, _item: &NewItem) -> Result<ItemId, ItemRepositoryError> {
        Err(self.error.clone())
    }

    async fn adjust_quantity(
        &self,
        _id: ItemId,
        _adjustment: QuantityAdjustment,
    ) -> Result<bool, ItemRepositoryError> {
        Err(self.error.clone())
    }

    async fn toggle_purchased(&self, _id: ItemId) -> Result<bool, ItemRepositoryError> {
        Err(self.error.clone())
    }

    async fn delete_item(&self, _id: ItemId) -> Result<bool, ItemRepositoryError> {
        Err(self.error.clone())
    }
}
