//! Error types for the fallible parts of the crate.
//!
//! Classification reports bad input through return values and the backoff
//! executor hands back the caller's own error type, so the only errors
//! defined here come from file-backed state.

use std::path::PathBuf;

/// Failures while reading or updating the `.env` flag file.
#[derive(Debug, thiserror::Error)]
pub enum EnvFileError {
    #[error("Invalid env key '{0}': must be non-empty and must not contain '=' or whitespace")]
    InvalidKey(String),

    #[error("Invalid value for '{key}': values must be a single line")]
    InvalidValue { key: String },

    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
