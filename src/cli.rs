//! Command-line interface definitions for Kandilli Quakes.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Source options can also be provided via environment variables.

use crate::outputs::{DEFAULT_HIGHLIGHT_THRESHOLD, OutputFormat};
use crate::sources::http::DEFAULT_FEED_URL;
use clap::Parser;
use std::path::PathBuf;
use url::Url;

/// Command-line arguments for the Kandilli Quakes application.
///
/// # Examples
///
/// ```sh
/// # HTML widget for the live feed on stdout
/// kandilli_quakes
///
/// # Plain-text table from a recorded feed
/// kandilli_quakes --input tests/fixtures/koeri_sample.xml --format text
///
/// # JSON report written to a file
/// kandilli_quakes -f json -o ./public/quakes.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// URL of the KOERI RSS feed
    #[arg(long, env = "KOERI_FEED_URL", default_value = DEFAULT_FEED_URL, value_parser = parse_feed_url)]
    pub feed_url: Url,

    /// Read a recorded feed from this file instead of fetching (overrides --feed-url)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Timeout in seconds for the single feed request
    #[arg(long, env = "KOERI_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Magnitude at or above which earthquakes are highlighted
    #[arg(long, default_value_t = DEFAULT_HIGHLIGHT_THRESHOLD)]
    pub highlight_threshold: f64,
}

/// Accept only absolute `http`/`https` URLs.
fn parse_feed_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|e| format!("invalid feed URL: {}", e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported URL scheme: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["kandilli_quakes"]);

        assert_eq!(cli.feed_url.as_str(), DEFAULT_FEED_URL);
        assert_eq!(cli.format, OutputFormat::Html);
        assert_eq!(cli.timeout_secs, 10);
        assert_eq!(cli.highlight_threshold, 3.0);
        assert!(cli.input.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "kandilli_quakes",
            "-i",
            "feed.xml",
            "-f",
            "json",
            "-o",
            "/tmp/quakes.json",
        ]);

        assert_eq!(cli.input, Some(PathBuf::from("feed.xml")));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.output, Some(PathBuf::from("/tmp/quakes.json")));
    }

    #[test]
    fn test_cli_rejects_non_http_feed_url() {
        let res = Cli::try_parse_from(["kandilli_quakes", "--feed-url", "ftp://example.com/rss"]);
        assert!(res.is_err());

        let res = Cli::try_parse_from(["kandilli_quakes", "--feed-url", "not a url"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_parse_feed_url() {
        assert!(parse_feed_url("https://example.com/rss/").is_ok());
        assert!(parse_feed_url("file:///tmp/rss.xml").is_err());
    }
}
