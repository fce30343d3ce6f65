//! PostgreSQL-backed `ItemRepository` implementation using Diesel.
//!
//! Every port method issues a single statement. Quantity clamping and the
//! purchased flip are evaluated by the database inside the `UPDATE`, so no
//! method reads a row before writing it.

use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ItemRepository, ItemRepositoryError};
use crate::domain::{Item, ItemId, NewItem, Quantity, QuantityAdjustment};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ItemRow, NewItemRow};
use super::pool::DbPool;
use super::schema::items;

diesel::define_sql_function! {
    /// PostgreSQL `GREATEST` for two integers.
    fn greatest(a: Integer, b: Integer) -> Integer;
}

/// Diesel-backed implementation of the `ItemRepository` port.
#[derive(Clone)]
pub struct DieselItemRepository {
    pool: DbPool,
}

impl DieselItemRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a database row to a domain item.
fn row_to_item(row: ItemRow) -> Result<Item, ItemRepositoryError> {
    let id = ItemId::new(row.id).map_err(|err| {
        ItemRepositoryError::query(format!("invalid item id {}: {err}", row.id))
    })?;
    let quantity = Quantity::new(row.quantity).unwrap_or_else(|_| {
        warn!(
            item_id = row.id,
            value = row.quantity,
            "stored quantity below minimum, reading as 1"
        );
        Quantity::MIN
    });
    Ok(Item {
        id,
        name: row.name,
        quantity,
        category: row.category,
        purchased: row.purchased != 0,
    })
}

#[async_trait]
impl ItemRepository for DieselItemRepository {
    async fn list_items(&self) -> Result<Vec<Item>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ItemRow> = items::table
            .order((
                items::purchased.asc(),
                items::category.asc(),
                items::name.asc(),
            ))
            .select(ItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_item).collect()
    }

    async fn insert_item(&self, item: &NewItem) -> Result<ItemId, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewItemRow {
            name: item.name.as_str(),
            quantity: item.quantity.get(),
            category: item.category.label(),
        };

        let id: i32 = diesel::insert_into(items::table)
            .values(&row)
            .returning(items::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        ItemId::new(id)
            .map_err(|err| ItemRepositoryError::query(format!("invalid item id {id}: {err}")))
    }

    async fn adjust_quantity(
        &self,
        id: ItemId,
        adjustment: QuantityAdjustment,
    ) -> Result<bool, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = items::table.find(id.get());

        let affected = match adjustment {
            QuantityAdjustment::Increase => {
                diesel::update(target)
                    .set(items::quantity.eq(items::quantity + 1))
                    .execute(&mut conn)
                    .await
            }
            QuantityAdjustment::Decrease => {
                diesel::update(target)
                    .set(items::quantity.eq(greatest(Quantity::MIN.get(), items::quantity - 1)))
                    .execute(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }

    async fn toggle_purchased(&self, id: ItemId) -> Result<bool, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(items::table.find(id.get()))
            .set(items::purchased.eq(sql::<Integer>(
                "CASE WHEN purchased = 0 THEN 1 ELSE 0 END",
            )))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }

    async fn delete_item(&self, id: ItemId) -> Result<bool, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(items::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}
