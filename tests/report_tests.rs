// Integration tests for offline reports
//
// These tests write an exported records file and aggregate it at a fixed
// reference instant, as `calmmate report --records FILE --now TIME` does.

use anyhow::Result;
use calmmate::{render_report, report_from_file};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 28, 12, 0, 0).unwrap()
}

const RECORDS: &str = r#"[
    { "emotion": "joy", "confidence": 0.8, "createdAt": "2025-10-28T09:00:00Z" },
    { "emotion": "joy", "confidence": 0.6, "createdAt": "2025-10-28T10:00:00Z" },
    { "emotion": "sadness", "confidence": 0.9, "createdAt": "2025-10-27T09:00:00Z" }
]"#;

#[test]
fn test_report_from_records_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("records.json");
    fs::write(&path, RECORDS)?;

    let result = report_from_file(&path, now())?;

    assert_eq!(result.total_sessions, 3);
    assert_eq!(result.most_frequent_emotion, "joy");
    assert_eq!(result.average_confidence, 0.7667);
    assert_eq!(result.emotion_over_time[13].confidence, Some(0.6));
    assert_eq!(result.streak_days, 2);

    Ok(())
}

#[test]
fn test_rendered_report_uses_wire_names() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("records.json");
    fs::write(&path, RECORDS)?;

    let rendered: Value = serde_json::from_str(&render_report(&path, now())?)?;

    assert_eq!(rendered["totalSessions"], json!(3));
    assert_eq!(rendered["streakDays"], json!(2));
    assert_eq!(rendered["emotionOverTime"][13]["date"], json!("2025-10-28"));

    Ok(())
}

#[test]
fn test_empty_records_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("records.json");
    fs::write(&path, "[]")?;

    let result = report_from_file(&path, now())?;

    assert_eq!(result.total_sessions, 0);
    assert_eq!(result.most_frequent_emotion, "—");
    assert_eq!(result.emotion_over_time.len(), 14);

    Ok(())
}

#[test]
fn test_missing_or_malformed_file_is_an_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    assert!(report_from_file(&temp_dir.path().join("absent.json"), now()).is_err());

    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{ not records")?;
    assert!(report_from_file(&path, now()).is_err());

    Ok(())
}
