//! Error types for profile storage

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing profile data
#[derive(Debug, Error)]
pub enum StoreError {
    /// The platform data directory could not be determined
    #[error("Failed to determine data directory")]
    NoDataDir,

    /// Filesystem access failed
    #[error("I/O error at {path:?}: {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A record could not be serialized or parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored profile directory name could not be decoded
    #[error("Invalid profile directory name: {0}")]
    InvalidProfileName(String),
}

impl StoreError {
    /// Wrap an I/O error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io { path: path.into(), source }
    }

    /// Whether the failure is about the stored content rather than the medium
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, StoreError::Json(_) | StoreError::InvalidProfileName(_))
    }
}
