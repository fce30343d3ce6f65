//! Diesel and pool error mapping for the item repository.
//!
//! Adapter messages are coarse on purpose; the full driver error is only
//! written to the debug log.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;
use crate::domain::ports::ItemRepositoryError;

/// Map pool failures to connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> ItemRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ItemRepositoryError::connection(message)
        }
    }
}

/// Map Diesel failures to query or connection errors.
pub(crate) fn map_diesel_error(error: DieselError) -> ItemRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => ItemRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => ItemRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ItemRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            ItemRepositoryError::query("item constraint violated")
        }
        _ => ItemRepositoryError::query("database error"),
    }
}
