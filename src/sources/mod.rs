//! Feed sources: where the raw RSS bytes come from.
//!
//! Each source makes exactly one attempt and reports failure as a
//! [`FetchError`]; nothing here retries.
//!
//! # Supported Sources
//!
//! | Source | Module | Notes |
//! |--------|--------|-------|
//! | KOERI over HTTP | [`http`] | Single GET bounded by a timeout |
//! | Recorded feed file | [`file`] | For offline runs and fixtures |

pub mod file;
pub mod http;

use crate::error::FetchError;

/// Something that can produce the raw bytes of a feed document.
pub trait FeedSource {
    /// Human-readable origin for logs (a URL or a path).
    fn describe(&self) -> String;

    /// Fetch the feed once.
    async fn fetch(&self) -> Result<Vec<u8>, FetchError>;
}
