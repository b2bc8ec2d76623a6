//! Offline analytics over an exported records file

use crate::analytics::{aggregate, AnalyticsResult};
use crate::session::SessionRecord;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::info;

/// Read a JSON array of session records and aggregate it as of `reference`
pub fn report_from_file(path: &Path, reference: DateTime<Utc>) -> Result<AnalyticsResult> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    let records: Vec<SessionRecord> = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse session records from {:?}", path))?;

    info!("Aggregating {} records from {:?}", records.len(), path);

    Ok(aggregate(&records, reference))
}

/// Same as `report_from_file`, rendered as pretty JSON
pub fn render_report(path: &Path, reference: DateTime<Utc>) -> Result<String> {
    let result = report_from_file(path, reference)?;
    serde_json::to_string_pretty(&result).context("Failed to serialize analytics")
}
