//! KOERI feed over HTTP.
//!
//! The Kandilli Observatory publishes its latest earthquakes at
//! [`DEFAULT_FEED_URL`]. One GET is made per run; a non-success status, an
//! empty body, or a transport error (including the timeout) is a
//! [`FetchError`].

use super::FeedSource;
use crate::error::FetchError;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};
use url::Url;

/// The public KOERI RSS feed.
pub const DEFAULT_FEED_URL: &str = "http://koeri.boun.edu.tr/rss/";

#[derive(Debug)]
pub struct HttpSource {
    client: Client,
    url: Url,
}

impl HttpSource {
    /// Build a source for `url` whose single request gives up after `timeout`.
    pub fn new(url: Url, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, url })
    }
}

impl FeedSource for HttpSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    #[instrument(level = "info", skip_all, fields(url = %self.url))]
    async fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        let t0 = Instant::now();
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(%status, "Feed request returned non-success status");
            return Err(FetchError::Status {
                status,
                url: self.url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(FetchError::EmptyBody);
        }

        info!(
            bytes = bytes.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched KOERI feed"
        );
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_feed_url_parses() {
        let url = Url::parse(DEFAULT_FEED_URL).unwrap();
        assert_eq!(url.host_str(), Some("koeri.boun.edu.tr"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        // Nothing listens on the discard port of the loopback interface.
        let url = Url::parse("http://127.0.0.1:9/rss/").unwrap();
        let source = HttpSource::new(url, Duration::from_secs(2)).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Request(_)));
    }
}
