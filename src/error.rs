//! Error types for the alertmap pipeline.
//!
//! All errors are explicitly typed using thiserror. The enrichment core
//! recovers from bad input (malformed timestamps, unknown regions) rather
//! than failing; only the collaborators (network, file I/O, config) surface
//! errors to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Central error type for all alertmap operations.
#[derive(Debug, Error)]
pub enum AlertmapError {
    /// Configuration error (missing env vars, invalid values).
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream API returned an error or unexpected response.
    #[error("Upstream API error: {0}")]
    Upstream(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File system error with the path that failed.
    #[error("IO error at {path}: {source}")]
    Io {
        /// Path of the file or directory being accessed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl AlertmapError {
    /// Wrap an IO error with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for alertmap operations.
pub type Result<T> = std::result::Result<T, AlertmapError>;
