//! Shared application state.

use std::sync::Arc;

use warehouse_db::ResourceStore;

/// State handed to every handler.
///
/// The store is injected rather than global, so the same router runs over
/// MySQL in production and over an in-memory store in tests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResourceStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        AppState { store }
    }
}
