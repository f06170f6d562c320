//! Error types for RTL emission.

use std::path::PathBuf;

/// Errors that can occur while writing emitted RTL to disk.
///
/// Generating the text itself cannot fail; only the file system can.
#[derive(Debug, thiserror::Error)]
pub enum RtlError {
    /// A directory or file could not be created or written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
