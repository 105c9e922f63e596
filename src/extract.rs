//! Field extraction from KOERI feed entries.
//!
//! A feed entry only becomes an [`EarthquakeRecord`] if it was published in
//! the last 24 hours and its title carries a magnitude. Location and depth are
//! best effort and fall back to [`UNKNOWN`].
//!
//! Each field has its own matcher returning `Option`, so every rule can be
//! exercised on bare strings.
//!
//! # Title and description shapes
//!
//! ```text
//! title:       4.2 (Mw) Gulf of Izmir 2024.
//!              ^^^ ^^^^ ^^^^^^^^^^^^^ ^^^^^
//!              mag unit location      year-dot boundary
//! description: Büyüklük 4.2 (Mw) - Gulf of Izmir - 7.1 km
//!                                                  ^^^^^^ trailing depth
//! ```

use crate::models::{EarthquakeRecord, FeedEntry, UNKNOWN};
use crate::utils::{collapse_whitespace, format_timestamp, one_decimal, parse_leading_float};
use chrono::{DateTime, Duration, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use tracing::debug;

/// Entries published longer ago than this are dropped.
pub const RECENCY_WINDOW_SECS: i64 = 24 * 60 * 60;

/// Moment magnitude, tried first.
static MW_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9.]+)\s*\(Mw\)").expect("valid Mw regex"));

/// Local magnitude, the fallback.
static ML_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9.]+)\s*\(ML\)").expect("valid ML regex"));

/// Everything up to the first `YYYY.` after the magnitude marker.
static LOCATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(.*?)\s*[0-9]{4}\.").expect("valid location regex"));

/// A number, optionally followed by `km`, at the very end of the description.
static DEPTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s([0-9.]+)\s*(?:km)?\s*$").expect("valid depth regex"));

/// Why an entry was left out of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// `pubDate` was missing or could not be parsed.
    UnparseableDate,
    /// Published more than [`RECENCY_WINDOW_SECS`] before now.
    Stale,
    /// Neither an `(Mw)` nor an `(ML)` magnitude in the title.
    NoMagnitude,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Skip::UnparseableDate => "unparseable publish date",
            Skip::Stale => "older than 24 hours",
            Skip::NoMagnitude => "no (Mw) or (ML) magnitude in title",
        };
        f.write_str(reason)
    }
}

/// A magnitude found in a title.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeMatch {
    pub value: f64,
    /// Byte offset just past the closing parenthesis of the unit marker.
    pub marker_end: usize,
}

/// Find the magnitude in a title. `(Mw)` wins over `(ML)`.
///
/// A pattern whose numeral holds no digit (e.g. `". (Mw)"`) counts as no
/// match, so the next pattern is tried.
pub fn match_magnitude(title: &str) -> Option<MagnitudeMatch> {
    [&*MW_PATTERN, &*ML_PATTERN].into_iter().find_map(|pattern| {
        let caps = pattern.captures(title)?;
        let value = parse_leading_float(caps.get(1)?.as_str())?;
        Some(MagnitudeMatch {
            value,
            marker_end: caps.get(0)?.end(),
        })
    })
}

/// Find the location: the text between the magnitude marker and the first
/// four-digit year followed by a dot, whitespace-normalized.
///
/// Returns `None` when no year-dot boundary follows the marker or the
/// segment between them is blank.
pub fn match_location(title: &str, marker_end: usize) -> Option<String> {
    let rest = title.get(marker_end..)?;
    let caps = LOCATION_PATTERN.captures(rest)?;
    let location = collapse_whitespace(caps.get(1)?.as_str());
    if location.is_empty() {
        None
    } else {
        Some(location)
    }
}

/// Find the depth in kilometres at the end of a description.
pub fn match_depth(description: &str) -> Option<f64> {
    let caps = DEPTH_PATTERN.captures(description)?;
    parse_leading_float(caps.get(1)?.as_str())
}

/// Derive an [`EarthquakeRecord`] from one feed entry, or say why not.
///
/// `now` carries the reporting timezone: the record's `occurred_at` is
/// rendered in `now`'s offset.
///
/// Steps, in order:
/// 1. Drop entries with no usable `pubDate` or older than 24 hours.
/// 2. Require a magnitude in the title.
/// 3. Take location from the title and depth from the description,
///    falling back to [`UNKNOWN`].
pub fn extract(entry: &FeedEntry, now: DateTime<FixedOffset>) -> Result<EarthquakeRecord, Skip> {
    let published = entry.publish_time.ok_or(Skip::UnparseableDate)?;

    if now.signed_duration_since(published) > Duration::seconds(RECENCY_WINDOW_SECS) {
        return Err(Skip::Stale);
    }

    let magnitude = match_magnitude(&entry.title).ok_or(Skip::NoMagnitude)?;

    let location = match_location(&entry.title, magnitude.marker_end)
        .unwrap_or_else(|| UNKNOWN.to_string());

    let depth = match match_depth(&entry.description) {
        Some(km) => format!("{} km", one_decimal(km)),
        None => UNKNOWN.to_string(),
    };

    let record = EarthquakeRecord {
        depth,
        magnitude: one_decimal(magnitude.value),
        location,
        occurred_at: format_timestamp(&published, now.timezone()),
    };
    debug!(
        magnitude = %record.magnitude,
        location = %record.location,
        depth = %record.depth,
        "Extracted earthquake record"
    );
    Ok(record)
}
