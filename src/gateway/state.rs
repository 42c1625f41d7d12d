use std::sync::Arc;

use crate::account::AccountStore;
use crate::transfer::TransferEngine;

/// Gateway application state (shared)
#[derive(Clone)]
pub struct AppState {
    /// Transfer engine, owns the store handle
    pub engine: TransferEngine,
}

impl AppState {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self {
            engine: TransferEngine::new(store),
        }
    }

    /// Backend name, for health output
    pub fn store_name(&self) -> &'static str {
        self.engine.store().name()
    }
}
