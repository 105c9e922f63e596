//! Data models for feed entries, extracted earthquake records, and run outcomes.
//!
//! This module defines the core data structures used throughout the application:
//! - [`FeedEntry`]: One raw `<item>` from the KOERI RSS feed
//! - [`EarthquakeRecord`]: A typed record derived from a feed entry
//! - [`Outcome`]: The single result of a report run, handed to the outputs
//!
//! Both entries and records live for one extraction pass only.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Placeholder shown for a depth or location that the feed text did not carry.
pub const UNKNOWN: &str = "-";

/// A single feed item as decoded from the RSS document.
///
/// # Fields
///
/// * `title` - Free text carrying the magnitude token and the location
/// * `description` - Free text ending in the depth measurement
/// * `publish_time` - The parsed `pubDate`, or `None` when absent or unparseable
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub description: String,
    pub publish_time: Option<DateTime<FixedOffset>>,
}

/// An earthquake extracted from one feed entry.
///
/// All fields are display-ready text; the numeric fields always carry exactly
/// one digit after the decimal point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeRecord {
    /// Depth such as `"7.1 km"`, or [`UNKNOWN`].
    pub depth: String,
    /// Magnitude such as `"4.2"`. Always present.
    pub magnitude: String,
    /// Whitespace-normalized place name, or [`UNKNOWN`].
    pub location: String,
    /// Publish time as `dd.mm.YYYY HH:MM` in Europe/Istanbul.
    pub occurred_at: String,
}

impl EarthquakeRecord {
    /// The magnitude as a number, for threshold comparisons in the outputs.
    pub fn magnitude_value(&self) -> f64 {
        self.magnitude.parse().unwrap_or(0.0)
    }

    /// Whether this record meets the highlight threshold.
    pub fn is_high_magnitude(&self, threshold: f64) -> bool {
        self.magnitude_value() >= threshold
    }
}

/// The result of one report run.
///
/// Exactly one of these is produced per run, and every output format knows
/// how to render all four.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// At least one qualifying record, in feed order.
    Records(Vec<EarthquakeRecord>),
    /// The feed was valid but nothing qualified in the last 24 hours.
    Empty,
    /// The feed source could not be reached or returned no data.
    FetchFailure,
    /// The retrieved content was not valid feed markup.
    ParseFailure,
}

impl Outcome {
    /// Machine-readable status name used in JSON output and logs.
    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Records(_) => "ok",
            Outcome::Empty => "empty",
            Outcome::FetchFailure => "fetch_failure",
            Outcome::ParseFailure => "parse_failure",
        }
    }

    /// The user-facing message for non-record outcomes.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Outcome::Records(_) => None,
            Outcome::Empty => {
                Some("Son 24 saat içerisinde herhangi bir deprem kaydedilmedi.")
            }
            Outcome::FetchFailure => Some(
                "Boğaziçi Üniversitesi Kandilli Rasathanesi verilerine şu anda ulaşılamıyor.",
            ),
            Outcome::ParseFailure => Some("Alınan deprem verisi (XML) işlenemedi."),
        }
    }

    /// Whether this outcome is one of the two failure kinds.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::FetchFailure | Outcome::ParseFailure)
    }

    pub fn records(&self) -> &[EarthquakeRecord] {
        match self {
            Outcome::Records(records) => records,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(magnitude: &str) -> EarthquakeRecord {
        EarthquakeRecord {
            depth: "7.1 km".to_string(),
            magnitude: magnitude.to_string(),
            location: "Gulf of Izmir".to_string(),
            occurred_at: "18.10.2025 10:12".to_string(),
        }
    }

    #[test]
    fn test_high_magnitude_threshold_is_inclusive() {
        assert!(record("3.0").is_high_magnitude(3.0));
        assert!(record("4.2").is_high_magnitude(3.0));
        assert!(!record("2.9").is_high_magnitude(3.0));
    }

    #[test]
    fn test_outcome_messages_are_distinct() {
        let empty = Outcome::Empty.message().unwrap();
        let fetch = Outcome::FetchFailure.message().unwrap();
        let parse = Outcome::ParseFailure.message().unwrap();
        assert_ne!(empty, fetch);
        assert_ne!(fetch, parse);
        assert_ne!(empty, parse);
        assert!(Outcome::Records(vec![record("4.2")]).message().is_none());
    }

    #[test]
    fn test_outcome_failure_kinds() {
        assert!(Outcome::FetchFailure.is_failure());
        assert!(Outcome::ParseFailure.is_failure());
        assert!(!Outcome::Empty.is_failure());
        assert!(!Outcome::Records(vec![]).is_failure());
    }

    #[test]
    fn test_record_serialization() {
        let json = serde_json::to_string(&record("4.2")).unwrap();
        assert!(json.contains(r#""magnitude":"4.2""#));
        assert!(json.contains(r#""depth":"7.1 km""#));
        assert!(json.contains(r#""occurred_at":"18.10.2025 10:12""#));
    }
}
