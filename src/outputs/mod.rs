//! Report rendering for the three output formats.
//!
//! Every format renders all four [`Outcome`] kinds: the record table for
//! [`Outcome::Records`], and a single message for the empty and failure
//! outcomes.
//!
//! # Submodules
//!
//! - [`html`]: The embeddable "Son Depremler" widget with its stylesheet
//! - [`json`]: Machine-readable report for API consumers
//! - [`text`]: Aligned plain-text table for terminals

pub mod html;
pub mod json;
pub mod text;

use crate::models::Outcome;
use chrono::{DateTime, FixedOffset};
use clap::ValueEnum;

/// Magnitude at or above which rows are highlighted.
pub const DEFAULT_HIGHLIGHT_THRESHOLD: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Json,
    Text,
}

/// Everything a renderer needs besides the outcome itself.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub outcome: &'a Outcome,
    /// When the report was produced, already in the reporting timezone.
    pub generated_at: DateTime<FixedOffset>,
    pub highlight_threshold: f64,
}

/// Render `report` in the requested format.
pub fn render(format: OutputFormat, report: &Report<'_>) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Html => Ok(html::render(report)),
        OutputFormat::Json => json::render(report),
        OutputFormat::Text => Ok(text::render(report)),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::models::EarthquakeRecord;
    use crate::utils::istanbul;
    use chrono::TimeZone;

    pub fn generated_at() -> DateTime<FixedOffset> {
        istanbul().with_ymd_and_hms(2024, 10, 18, 9, 15, 0).unwrap()
    }

    pub fn records() -> Outcome {
        Outcome::Records(vec![
            EarthquakeRecord {
                depth: "7.1 km".to_string(),
                magnitude: "4.2".to_string(),
                location: "Gulf of Izmir".to_string(),
                occurred_at: "18.10.2024 07:12".to_string(),
            },
            EarthquakeRecord {
                depth: "-".to_string(),
                magnitude: "2.3".to_string(),
                location: "MARMARA <DENIZI> & co".to_string(),
                occurred_at: "18.10.2024 06:41".to_string(),
            },
        ])
    }
}
