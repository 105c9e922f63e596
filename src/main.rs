//! # Kandilli Quakes
//!
//! Reports the earthquakes of the last 24 hours from the Kandilli Observatory
//! (KOERI) RSS feed as an HTML widget, JSON, or a plain-text table.
//!
//! ## Usage
//!
//! ```sh
//! kandilli_quakes -f text
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Fetching**: One attempt to read the feed from KOERI or a recorded file
//! 2. **Parsing**: Decode the RSS document into feed entries
//! 3. **Extraction**: Turn each recent entry into an earthquake record
//! 4. **Output**: Render the outcome and write it to stdout or a file
//!
//! All timestamps are computed and displayed in Europe/Istanbul (UTC+03:00),
//! regardless of the host timezone.

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod error;
mod extract;
mod feed;
mod models;
mod outputs;
mod pipeline;
mod sources;
mod utils;

use cli::Cli;
use error::FetchError;
use outputs::Report;
use sources::FeedSource;
use sources::file::FileSource;
use sources::http::HttpSource;
use utils::{ensure_writable_parent, istanbul, now_in};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("kandilli_quakes starting up");

    let args = Cli::parse();
    debug!(?args.feed_url, ?args.input, ?args.format, ?args.output, "Parsed CLI arguments");

    // Fail early rather than after the fetch
    if let Some(ref path) = args.output {
        if let Err(e) = ensure_writable_parent(path).await {
            error!(
                path = %path.display(),
                error = %e,
                "Output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    // ---- Fetch ----
    let fetched = match args.input {
        Some(ref path) => fetch_from(&FileSource::new(path)).await,
        None => match HttpSource::new(args.feed_url.clone(), Duration::from_secs(args.timeout_secs)) {
            Ok(source) => fetch_from(&source).await,
            Err(e) => Err(e),
        },
    };

    // ---- Parse and extract ----
    let tz = istanbul();
    let now = now_in(tz);
    let outcome = pipeline::run(fetched, now);
    info!(status = outcome.status(), records = outcome.records().len(), "Extraction finished");

    // ---- Render ----
    let report = Report {
        outcome: &outcome,
        generated_at: now,
        highlight_threshold: args.highlight_threshold,
    };
    let rendered = outputs::render(args.format, &report)?;

    match args.output {
        Some(ref path) => {
            info!(path = %path.display(), "Writing report");
            if let Err(e) = tokio::fs::write(path, &rendered).await {
                error!(path = %path.display(), error = %e, "Failed writing report");
                return Err(e.into());
            }
            info!(path = %path.display(), bytes = rendered.len(), "Wrote report");
        }
        None => print!("{}", rendered),
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Fetch once from `source`, logging where the bytes came from.
async fn fetch_from<S: FeedSource>(source: &S) -> Result<Vec<u8>, FetchError> {
    info!(source = %source.describe(), "Fetching feed");
    source.fetch().await
}
