//! Error types for reading specifications and graphs.

use std::path::PathBuf;

/// Errors that can occur when loading a model file.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// TOML content could not be deserialized.
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON content could not be deserialized.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension maps to no supported input format.
    #[error("unsupported input format for {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),
}
