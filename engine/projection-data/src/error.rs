//! Error types for dataset building

use std::path::PathBuf;
use thiserror::Error;
use weekly_stats::StatsError;

/// Result type alias for projection dataset operations
pub type Result<T> = std::result::Result<T, ProjectionError>;

/// Fatal errors that stop a dataset build
#[derive(Error, Debug)]
pub enum ProjectionError {
    /// Raw stats could not be loaded
    #[error("Raw stats error: {0}")]
    Stats(#[from] StatsError),

    /// I/O errors (output files, config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding/decoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML configuration parse errors
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),

    /// Run report serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Worker pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A dataset file does not match the emitted format
    #[error("Malformed dataset {path:?}: {reason}")]
    MalformedDataset { path: PathBuf, reason: String },
}

impl ProjectionError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new malformed dataset error
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedDataset { path: path.into(), reason: reason.into() }
    }
}
