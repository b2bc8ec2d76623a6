use super::SessionStore;
use crate::session::{SessionEntry, ValidSession};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// In-memory session store, optionally mirrored to a JSON snapshot file
pub struct MemoryStore {
    /// Sessions per user (user_id → sessions, oldest first)
    sessions: RwLock<HashMap<String, Vec<SessionEntry>>>,

    /// Snapshot rewritten after every insert, if configured
    snapshot_path: Option<PathBuf>,
}

impl MemoryStore {
    /// Create an empty store that lives only in memory
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            snapshot_path: None,
        }
    }

    /// Open a store backed by a snapshot file
    ///
    /// A missing file is treated as an empty store and is created on the
    /// first insert.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries: Vec<SessionEntry> = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("Failed to parse session snapshot: {:?}", path))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No session snapshot at {:?}, starting empty", path);
                Vec::new()
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read session snapshot: {:?}", path));
            }
        };

        info!("Loaded {} sessions from {:?}", entries.len(), path);

        Ok(Self {
            sessions: RwLock::new(group_by_user(entries)),
            snapshot_path: Some(path),
        })
    }

    /// Total number of stored sessions across all users
    pub async fn len(&self) -> usize {
        self.sessions.read().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn write_snapshot(
        &self,
        path: &Path,
        sessions: &HashMap<String, Vec<SessionEntry>>,
    ) -> Result<()> {
        let mut entries: Vec<&SessionEntry> = sessions.values().flatten().collect();
        entries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        let json = serde_json::to_vec_pretty(&entries).context("Failed to serialize sessions")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create snapshot directory: {:?}", parent))?;
        }

        // Write then rename so a crash never leaves a truncated snapshot
        let tmp_path = path.with_extension("tmp");
        tokio::fs::write(&tmp_path, json)
            .await
            .with_context(|| format!("Failed to write session snapshot: {:?}", tmp_path))?;
        tokio::fs::rename(&tmp_path, path)
            .await
            .with_context(|| format!("Failed to replace session snapshot: {:?}", path))?;

        debug!("Wrote {} sessions to {:?}", entries.len(), path);
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SessionStore for MemoryStore {
    async fn find_all_for_user(&self, user_id: &str) -> Result<Vec<SessionEntry>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(user_id).cloned().unwrap_or_default())
    }

    async fn insert(
        &self,
        user_id: &str,
        session: ValidSession,
        created_at: DateTime<Utc>,
    ) -> Result<SessionEntry> {
        let entry = SessionEntry {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            transcript: session.transcript,
            emotion: session.emotion,
            confidence: session.confidence,
            reply: session.reply,
            created_at,
        };

        // Hold the write lock through the snapshot so writers never interleave
        let mut sessions = self.sessions.write().await;
        let user_sessions = sessions.entry(user_id.to_string()).or_default();
        let at = user_sessions.partition_point(|s| s.created_at <= created_at);
        user_sessions.insert(at, entry.clone());

        if let Some(path) = &self.snapshot_path {
            if let Err(e) = self.write_snapshot(path, &sessions).await {
                // Keep memory and disk consistent
                if let Some(user_sessions) = sessions.get_mut(user_id) {
                    user_sessions.retain(|s| s.id != entry.id);
                }
                return Err(e);
            }
        }

        debug!("Stored session {} for user {}", entry.id, user_id);
        Ok(entry)
    }
}

fn group_by_user(entries: Vec<SessionEntry>) -> HashMap<String, Vec<SessionEntry>> {
    let mut grouped: HashMap<String, Vec<SessionEntry>> = HashMap::new();
    for entry in entries {
        grouped.entry(entry.user_id.clone()).or_default().push(entry);
    }
    for sessions in grouped.values_mut() {
        sessions.sort_by_key(|s| s.created_at);
    }
    grouped
}
