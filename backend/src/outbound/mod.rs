//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed item repository using Diesel.
//!
//! Adapters convert between domain types and infrastructure representations
//! and contain no business rules.

pub mod persistence;
