//! PostgreSQL persistence adapters using Diesel.
//!
//! - **Thin adapters**: `DieselItemRepository` only translates between Diesel
//!   rows and domain types; validation lives in the domain.
//! - **Internal models**: row structs (`models.rs`) and the table definition
//!   (`schema.rs`) never leave this module.
//! - **Async pooling**: connections come from a `bb8` pool through
//!   `diesel-async`.
//! - **Typed errors**: pool and Diesel failures map to `ItemRepositoryError`.
//! - **TLS**: optional rustls transport selected per pool (`DatabaseTls`).
//!
//! # Example
//!
//! ```no_run
//! use shopping_list::outbound::persistence::{
//!     DbPool, DieselItemRepository, PoolConfig, ensure_schema,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/shopping")).await?;
//! ensure_schema(&pool).await?;
//! let repo = DieselItemRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod bootstrap;
mod diesel_error_mapping;
mod diesel_item_repository;
mod models;
mod pool;
mod schema;
mod tls;

pub use bootstrap::{CREATE_ITEMS_TABLE, ensure_schema};
pub use diesel_item_repository::DieselItemRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
pub use tls::{DatabaseTls, ParseDatabaseTlsError};
