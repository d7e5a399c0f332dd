//! Error types for the replay tool.

use std::path::PathBuf;

use thiserror::Error;

/// Startup and runtime errors for the replay tool.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The configured events file could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading events or writing reports failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A report could not be serialized.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
