//! JSON output for API consumers.
//!
//! # Output Shape
//!
//! ```text
//! {
//!   "status": "ok" | "empty" | "fetch_failure" | "parse_failure",
//!   "generated_at": "2024-10-18T09:15:00+03:00",
//!   "window_hours": 24,
//!   "highlight_threshold": 3.0,
//!   "message": null | "...",
//!   "records": [ { "depth", "magnitude", "location", "occurred_at", "high_magnitude" } ]
//! }
//! ```

use super::Report;
use crate::extract::RECENCY_WINDOW_SECS;
use crate::models::EarthquakeRecord;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonRecord<'a> {
    #[serde(flatten)]
    record: &'a EarthquakeRecord,
    high_magnitude: bool,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    status: &'static str,
    generated_at: String,
    window_hours: i64,
    highlight_threshold: f64,
    message: Option<&'static str>,
    records: Vec<JsonRecord<'a>>,
}

/// Serialize the report as pretty-printed JSON.
pub fn render(report: &Report<'_>) -> Result<String, serde_json::Error> {
    let records = report
        .outcome
        .records()
        .iter()
        .map(|record| JsonRecord {
            record,
            high_magnitude: record.is_high_magnitude(report.highlight_threshold),
        })
        .collect();

    let json = JsonReport {
        status: report.outcome.status(),
        generated_at: report.generated_at.to_rfc3339(),
        window_hours: RECENCY_WINDOW_SECS / 3600,
        highlight_threshold: report.highlight_threshold,
        message: report.outcome.message(),
        records,
    };
    serde_json::to_string_pretty(&json)
}
