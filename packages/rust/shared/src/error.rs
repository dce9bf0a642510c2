//! Error types for html2ipynb.
//!
//! Library crates use [`Html2IpynbError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Extraction itself has no error variants: missing markup and unparseable
//! prompts are fallbacks, not failures.

use std::path::PathBuf;

/// Top-level error type for all html2ipynb operations.
#[derive(Debug, thiserror::Error)]
pub enum Html2IpynbError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// The input cannot be converted (missing, or not an HTML document).
    #[error("{message}")]
    Precondition { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The destination notebook already exists and overwriting is disabled.
    #[error("destination {path:?} already exists (use --force to overwrite)")]
    DestinationExists { path: PathBuf },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, Html2IpynbError>;

impl Html2IpynbError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a precondition error from any displayable message.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
