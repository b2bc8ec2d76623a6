use super::date_key::DateKey;
use std::collections::HashSet;
use tracing::debug;

/// Progress of a streak scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreakState {
    /// Anchor not yet checked
    NotStarted,
    /// Walking backwards; holds the next day to check and the count so far
    Scanning { cursor: DateKey, count: u32 },
    /// Finished with the final count
    Stopped(u32),
}

/// Count consecutive active days ending today, or ending yesterday when
/// nothing has been logged today yet.
///
/// `active_days` is the full history of days with at least one session, not
/// only the trailing window.
pub fn streak_days(active_days: &HashSet<DateKey>, today: DateKey) -> u32 {
    let mut state = StreakState::NotStarted;

    loop {
        state = match state {
            StreakState::NotStarted => {
                let anchor = if active_days.contains(&today) {
                    Some(today)
                } else {
                    today.pred()
                };

                match anchor {
                    Some(day) if active_days.contains(&day) => StreakState::Scanning {
                        cursor: day,
                        count: 0,
                    },
                    _ => StreakState::Stopped(0),
                }
            }
            StreakState::Scanning { cursor, count } => {
                if !active_days.contains(&cursor) {
                    StreakState::Stopped(count)
                } else {
                    match cursor.pred() {
                        Some(prev) => StreakState::Scanning {
                            cursor: prev,
                            count: count + 1,
                        },
                        None => StreakState::Stopped(count + 1),
                    }
                }
            }
            StreakState::Stopped(count) => {
                debug!("Streak scan from {} stopped at {} days", today, count);
                return count;
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn today() -> DateKey {
        DateKey::new(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
    }

    fn days(offsets: &[u64]) -> HashSet<DateKey> {
        offsets.iter().map(|&n| today().days_before(n)).collect()
    }

    #[test]
    fn test_no_activity_is_zero() {
        assert_eq!(streak_days(&HashSet::new(), today()), 0);
    }

    #[test]
    fn test_streak_including_today() {
        assert_eq!(streak_days(&days(&[0, 1, 2]), today()), 3);
    }

    #[test]
    fn test_streak_anchored_on_yesterday() {
        assert_eq!(streak_days(&days(&[1, 2]), today()), 2);
    }

    #[test]
    fn test_gap_before_yesterday_breaks_streak() {
        assert_eq!(streak_days(&days(&[2, 3]), today()), 0);
    }

    #[test]
    fn test_streak_stops_at_first_gap() {
        assert_eq!(streak_days(&days(&[0, 1, 3, 4, 5]), today()), 2);
    }

    #[test]
    fn test_streak_reaches_beyond_window() {
        let history: Vec<u64> = (0..30).collect();
        assert_eq!(streak_days(&days(&history), today()), 30);
    }

    #[test]
    fn test_future_days_are_ignored() {
        let mut active = days(&[1]);
        active.insert(DateKey::new(NaiveDate::from_ymd_opt(2025, 6, 16).unwrap()));
        assert_eq!(streak_days(&active, today()), 1);
    }
}
