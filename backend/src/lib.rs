//! Shopping-list server library.
//!
//! Layout follows ports and adapters: [`domain`] holds the item rules and
//! use-case service, [`inbound`] the Actix handlers and HTML view, and
//! [`outbound`] the Diesel repository over PostgreSQL.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
