//! Error types for the regstat library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for regstat operations.
#[derive(Debug, Error)]
pub enum RegstatError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error opening or reading an archive.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input type not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty input or nothing to aggregate.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Error saving or loading a processed dataset.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The job was cancelled before it finished.
    #[error("Aggregation cancelled")]
    Cancelled,
}

/// Result type alias for regstat operations.
pub type Result<T> = std::result::Result<T, RegstatError>;
