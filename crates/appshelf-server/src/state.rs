use std::sync::Arc;

use appshelf_core::AppContext;
use tokio::sync::RwLock;

/// Shared application state accessible from all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// The one catalog + session container; every request goes through it.
    pub ctx: Arc<RwLock<AppContext>>,
}

impl AppState {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx: Arc::new(RwLock::new(ctx)),
        }
    }
}
