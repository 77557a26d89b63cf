//! Error handling for the inflation hub.
//!
//! Only setup failures are errors: a missing raw extract, a missing snapshot,
//! unusable configuration or a snapshot whose columns cannot be decoded.
//! Malformed rows are filtered during cleaning and never surface here.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Specialized error type for pipeline and snapshot operations
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error encoding or decoding Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error building or reading Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error parsing settings or rendering a report
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The raw extract (or its directory) is not where the configuration says
    #[error("Raw source not found at {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The snapshot has not been produced yet
    #[error("Snapshot not found at {}; run the pipeline first", .0.display())]
    SnapshotNotFound(PathBuf),

    /// Missing or unusable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required column is absent or has an unexpected type
    #[error("Schema error: {0}")]
    Schema(String),
}

impl HubError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// Whether this error signals an environment that is not ready yet
    /// (missing inputs or settings) rather than a failure while processing.
    #[must_use]
    pub const fn is_setup_error(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound(_) | Self::SnapshotNotFound(_) | Self::Config(_)
        )
    }
}

/// Result type for inflation hub operations
pub type Result<T> = std::result::Result<T, HubError>;
