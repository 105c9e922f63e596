//! One extraction pass: feed bytes in, [`Outcome`] out.
//!
//! The source is fetched elsewhere and its result handed in as-is, so the
//! pass itself is synchronous and a pure function of `(feed, now)`.

use crate::error::FetchError;
use crate::extract::extract;
use crate::feed;
use crate::models::{EarthquakeRecord, Outcome};
use crate::utils::truncate_for_log;
use chrono::{DateTime, FixedOffset};
use tracing::{debug, info, instrument, warn};

/// Turn the result of a feed fetch into the report outcome.
///
/// - A fetch error becomes [`Outcome::FetchFailure`].
/// - A document that does not parse becomes [`Outcome::ParseFailure`].
/// - Otherwise every entry is run through [`extract`] in feed order; skipped
///   entries are dropped and the rest kept in order.
/// - No surviving records gives [`Outcome::Empty`].
#[instrument(level = "info", skip_all, fields(now = %now))]
pub fn run(feed: Result<Vec<u8>, FetchError>, now: DateTime<FixedOffset>) -> Outcome {
    let bytes = match feed {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "Feed source unavailable");
            return Outcome::FetchFailure;
        }
    };

    let entries = match feed::parse(&bytes) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "Feed content is not valid RSS");
            return Outcome::ParseFailure;
        }
    };

    let total = entries.len();
    let records: Vec<EarthquakeRecord> = entries
        .iter()
        .filter_map(|entry| match extract(entry, now) {
            Ok(record) => Some(record),
            Err(reason) => {
                debug!(
                    title = %truncate_for_log(&entry.title, 120),
                    %reason,
                    "Skipping feed entry"
                );
                None
            }
        })
        .collect();

    info!(
        total,
        kept = records.len(),
        skipped = total - records.len(),
        "Completed extraction pass"
    );

    if records.is_empty() {
        Outcome::Empty
    } else {
        Outcome::Records(records)
    }
}
