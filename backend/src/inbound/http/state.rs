//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ShoppingListCommand, ShoppingListQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub query: Arc<dyn ShoppingListQuery>,
    pub command: Arc<dyn ShoppingListCommand>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(query: Arc<dyn ShoppingListQuery>, command: Arc<dyn ShoppingListCommand>) -> Self {
        Self { query, command }
    }

    /// Construct state from a single service implementing both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: ShoppingListQuery + ShoppingListCommand + 'static,
    {
        let query: Arc<dyn ShoppingListQuery> = service.clone();
        let command: Arc<dyn ShoppingListCommand> = service;
        Self::new(query, command)
    }
}
