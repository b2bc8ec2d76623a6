use super::date_key::DateKey;
use serde::{Deserialize, Serialize};

/// How often one emotion label was recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionCount {
    pub emotion: String,
    pub count: usize,
}

/// One day of the trailing time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySlot {
    pub date: DateKey,

    /// Emotion of the latest session that day, empty when there was none
    pub emotion: String,

    /// Confidence of that session; `None` (not `0.0`) when the day is empty
    pub confidence: Option<f64>,
}

impl DaySlot {
    pub fn empty(date: DateKey) -> Self {
        Self {
            date,
            emotion: String::new(),
            confidence: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.confidence.is_none()
    }
}

/// Emotional patterns computed over one user's sessions
///
/// Field names on the wire are fixed for dashboard compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResult {
    /// Sorted by count descending, ties in first-seen order
    pub emotion_counts: Vec<EmotionCount>,

    /// Exactly `WINDOW_DAYS` slots, oldest first, ending on the reference day
    pub emotion_over_time: Vec<DaySlot>,

    /// Mean confidence rounded to 4 decimal places, `0` without sessions
    pub average_confidence: f64,

    pub total_sessions: usize,

    /// Head of `emotion_counts`, or `NO_EMOTION`
    pub most_frequent_emotion: String,

    pub streak_days: u32,
}
