use crate::clock::{Clock, SystemClock};
use crate::store::{MemoryStore, SessionStore};
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Where sessions are stored and read back from
    pub store: Arc<dyn SessionStore>,

    /// Reference clock for analytics and new session timestamps
    pub clock: Arc<dyn Clock>,

    /// Reported by the health check
    pub service_name: String,
}

impl AppState {
    pub fn new(store: Arc<dyn SessionStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            service_name: "calmmate".to_string(),
        }
    }

    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(SystemClock))
    }
}
