use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The slice of a session the analytics engine reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Detected emotion label (open set: classifiers may emit new labels)
    pub emotion: String,

    /// Classifier confidence (0.0 to 1.0)
    pub confidence: f64,

    /// When the session was stored
    pub created_at: DateTime<Utc>,
}

/// A stored voice session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEntry {
    /// Unique session identifier
    pub id: String,

    /// Owner of the session
    pub user_id: String,

    /// What the user said
    pub transcript: String,

    pub emotion: String,

    pub confidence: f64,

    /// What the assistant replied
    pub reply: String,

    pub created_at: DateTime<Utc>,
}

impl SessionEntry {
    /// Project down to the fields analytics needs
    pub fn record(&self) -> SessionRecord {
        SessionRecord {
            emotion: self.emotion.clone(),
            confidence: self.confidence,
            created_at: self.created_at,
        }
    }
}
