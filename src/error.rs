//! Error types for the two ways a report run can fail before extraction.
//!
//! Per-entry problems (stale dates, missing magnitudes) are not errors: the
//! extractor drops those entries silently. Only a source that yields no
//! bytes and a document that is not a feed surface as errors, and the
//! pipeline folds both into an [`crate::models::Outcome`].

use thiserror::Error;

/// The feed source could not deliver any bytes.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} when fetching {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("feed source returned an empty body")]
    EmptyBody,

    #[error("failed to read feed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The fetched bytes are not a well-formed feed document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("XML parse error at byte {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("feed is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("document has no root element")]
    NoRoot,

    #[error("document has more than one root element")]
    MultipleRoots,

    #[error("undefined entity reference &{0};")]
    UnknownEntity(String),

    #[error("unexpected text outside the root element")]
    StrayText,

    #[error("unclosed element <{0}> at end of document")]
    Unclosed(String),
}
