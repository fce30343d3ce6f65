//! HTTP inbound adapter serving the shopping-list pages and probes.

pub mod error;
pub mod health;
pub mod items;
pub mod state;
pub mod view;

pub use error::ApiResult;
