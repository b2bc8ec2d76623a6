//! Session analytics
//!
//! Turns a user's session records into the dashboard summary:
//! - emotion frequency distribution
//! - trailing 14-day emotion/confidence series
//! - mean confidence
//! - consecutive-day activity streak
//!
//! Everything here is pure and synchronous. Callers fetch the records and
//! pick the reference instant; nothing in this module does I/O.

mod aggregator;
mod date_key;
mod result;
mod streak;

pub use aggregator::{aggregate, round_confidence, NO_EMOTION, WINDOW_DAYS};
pub use date_key::DateKey;
pub use result::{AnalyticsResult, DaySlot, EmotionCount};
pub use streak::streak_days;
