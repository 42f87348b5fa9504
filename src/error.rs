//! Centralized error types for threadmedia.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the threadmedia library.
#[derive(Error, Debug)]
pub enum ThreadMediaError {
    /// I/O error with the associated file path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified file does not exist.
    #[error("Thread file not found: {0}")]
    FileNotFound(PathBuf),

    /// The thread document could not be decoded.
    #[error("Invalid thread document '{path}': {reason}")]
    InvalidThread { path: PathBuf, reason: String },

    /// The configured API root is not an absolute URL.
    #[error("Invalid API root: {0}")]
    InvalidApiRoot(String),

    /// A thread policy could not classify an action.
    #[error("Thread policy error: {0}")]
    Policy(String),

    /// An export operation failed.
    #[error("Export error: {0}")]
    ExportError(String),
}

/// Convenience alias for `Result<T, ThreadMediaError>`.
pub type Result<T> = std::result::Result<T, ThreadMediaError>;

impl ThreadMediaError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an `InvalidThread` variant for input that did not come from a file.
    pub fn invalid_inline(reason: impl Into<String>) -> Self {
        Self::InvalidThread {
            path: PathBuf::from("<inline>"),
            reason: reason.into(),
        }
    }
}
