//! Error types for the release index.
//!
//! Store failures are fatal to the running operation. A scan that cannot begin
//! walking its subtree is reported but does not abort the process.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the release index.
#[derive(Debug, Error)]
pub enum BobIndexError {
    // Database errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Cannot start walking {path}: {message}")]
    TraversalStart { path: PathBuf, message: String },
}

/// Result type alias for index operations.
pub type Result<T> = std::result::Result<T, BobIndexError>;

impl From<std::io::Error> for BobIndexError {
    fn from(err: std::io::Error) -> Self {
        BobIndexError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<rusqlite::Error> for BobIndexError {
    fn from(err: rusqlite::Error) -> Self {
        BobIndexError::Database {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl BobIndexError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        BobIndexError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Whether the process must abort on this error.
    ///
    /// Only a scan that could not begin its walk is recoverable; the index
    /// simply stays as it was.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, BobIndexError::TraversalStart { .. })
    }
}
