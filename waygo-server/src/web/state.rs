//! Application state for the web layer.

use std::sync::Arc;

use crate::state::AppStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AppStore>,
}

impl AppState {
    pub fn new(store: AppStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
