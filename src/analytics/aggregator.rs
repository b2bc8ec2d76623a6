use super::date_key::DateKey;
use super::result::{AnalyticsResult, DaySlot, EmotionCount};
use super::streak::streak_days;
use crate::session::SessionRecord;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Number of daily slots in `emotion_over_time`
pub const WINDOW_DAYS: usize = 14;

/// `most_frequent_emotion` when there are no sessions
pub const NO_EMOTION: &str = "—";

/// Compute analytics for one user's sessions as of `reference`.
///
/// Records may arrive in any order. Same-day collisions in the time series
/// resolve by creation time (latest wins); records with equal timestamps keep
/// their input order. Frequency ties resolve by first occurrence in the input.
pub fn aggregate(records: &[SessionRecord], reference: DateTime<Utc>) -> AnalyticsResult {
    let today = DateKey::from_instant(reference);
    let mut emotion_over_time = empty_window(today);

    if records.is_empty() {
        return AnalyticsResult {
            emotion_counts: Vec::new(),
            emotion_over_time,
            average_confidence: 0.0,
            total_sessions: 0,
            most_frequent_emotion: NO_EMOTION.to_string(),
            streak_days: 0,
        };
    }

    let emotion_counts = count_emotions(records);

    let total_confidence: f64 = records.iter().map(|r| r.confidence).sum();
    let average_confidence = round_confidence(total_confidence / records.len() as f64);

    // Stable sort: equal timestamps keep caller order
    let mut ordered: Vec<&SessionRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.created_at);
    fill_window(&mut emotion_over_time, &ordered);

    let active_days: HashSet<DateKey> = records
        .iter()
        .map(|r| DateKey::from_instant(r.created_at))
        .collect();
    let streak_days = streak_days(&active_days, today);

    let most_frequent_emotion = emotion_counts
        .first()
        .map(|c| c.emotion.clone())
        .unwrap_or_else(|| NO_EMOTION.to_string());

    debug!(
        "Aggregated {} sessions: {} distinct emotions, streak {} days",
        records.len(),
        emotion_counts.len(),
        streak_days
    );

    AnalyticsResult {
        emotion_counts,
        emotion_over_time,
        average_confidence,
        total_sessions: records.len(),
        most_frequent_emotion,
        streak_days,
    }
}

/// Round half away from zero to 4 decimal places
pub fn round_confidence(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// `WINDOW_DAYS` empty slots ending on `today`
fn empty_window(today: DateKey) -> Vec<DaySlot> {
    (0..WINDOW_DAYS as u64)
        .rev()
        .map(|offset| DaySlot::empty(today.days_before(offset)))
        .collect()
}

fn count_emotions(records: &[SessionRecord]) -> Vec<EmotionCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<EmotionCount> = Vec::new();

    for record in records {
        match index.get(record.emotion.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(record.emotion.as_str(), counts.len());
                counts.push(EmotionCount {
                    emotion: record.emotion.clone(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, so first-seen order survives among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Write each in-window record into its day's slot; later records overwrite
fn fill_window(window: &mut [DaySlot], ordered: &[&SessionRecord]) {
    let Some(start) = window.first().map(|slot| slot.date) else {
        return;
    };

    for record in ordered {
        let key = DateKey::from_instant(record.created_at);
        if key < start {
            continue;
        }

        let offset = (key.date() - start.date()).num_days();
        if let Some(slot) = usize::try_from(offset).ok().and_then(|i| window.get_mut(i)) {
            slot.emotion = record.emotion.clone();
            slot.confidence = Some(record.confidence);
        }
    }
}
