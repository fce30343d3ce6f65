//! Start-up schema bootstrap.
//!
//! The service owns a single table and never migrates it; bootstrap only
//! creates it when absent, so running it on every start is safe.

use diesel_async::RunQueryDsl;
use tracing::info;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;
use crate::domain::ports::ItemRepositoryError;

/// DDL for the `items` table.
pub const CREATE_ITEMS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS items (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    quantity INTEGER NOT NULL DEFAULT 1 CHECK (quantity >= 1),
    category TEXT NOT NULL,
    purchased INTEGER NOT NULL DEFAULT 0 CHECK (purchased IN (0, 1))
)";

/// Create the `items` table if it does not exist yet.
///
/// # Errors
///
/// Returns [`ItemRepositoryError`] when a connection cannot be checked out or
/// the statement fails.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), ItemRepositoryError> {
    let mut conn = pool.get().await.map_err(map_pool_error)?;
    diesel::sql_query(CREATE_ITEMS_TABLE)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
    info!(table = "items", "schema verified");
    Ok(())
}
