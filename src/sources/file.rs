//! Recorded feed read from disk.

use super::FeedSource;
use crate::error::FetchError;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeedSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(level = "info", skip_all, fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        let bytes = fs::read(&self.path).await.map_err(|source| FetchError::Io {
            path: self.describe(),
            source,
        })?;
        if bytes.is_empty() {
            return Err(FetchError::EmptyBody);
        }
        info!(bytes = bytes.len(), "Read recorded feed");
        Ok(bytes)
    }
}
