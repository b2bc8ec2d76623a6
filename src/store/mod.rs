//! Session persistence
//!
//! Analytics and the HTTP API only see the `SessionStore` trait; the
//! bundled implementation is an in-memory map with an optional JSON snapshot.

mod memory;

use crate::session::{SessionEntry, ValidSession};
use anyhow::Result;
use chrono::{DateTime, Utc};

pub use memory::MemoryStore;

/// Record store for voice sessions
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Every session belonging to `user_id`, oldest first
    async fn find_all_for_user(&self, user_id: &str) -> Result<Vec<SessionEntry>>;

    /// Store a validated session and return it with its assigned ID
    async fn insert(
        &self,
        user_id: &str,
        session: ValidSession,
        created_at: DateTime<Utc>,
    ) -> Result<SessionEntry>;
}
