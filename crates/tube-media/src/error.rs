//! Media adapter errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the media ingestion adapter
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Media file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Media file too large: {size} bytes (max {max})")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Unsupported media type: {0}")]
    UnsupportedType(String),

    #[error("Media object not found: {0}")]
    ObjectNotFound(String),

    #[error("Media storage error: {0}")]
    Storage(String),
}

impl MediaError {
    pub(crate) fn storage(context: &str, err: std::io::Error) -> Self {
        Self::Storage(format!("{context}: {err}"))
    }
}
