//! Error types for timetabling.
//!
//! The core GA is a deterministic in-memory computation, so every error is
//! a configuration or input problem. Nothing here is retryable.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading a catalog, configuring the GA, or
/// emitting a run record.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// A GA parameter is outside its valid range or names an unknown variant.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The catalog cannot support index generation (an empty list), or a
    /// chromosome disagrees with the catalog it is evaluated against.
    #[error("catalog inconsistency: {0}")]
    CatalogInconsistency(String),

    /// A catalog row could not be parsed.
    #[error("{}:{line}: {message}", .file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        message: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TimetableError>;

impl TimetableError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    pub(crate) fn catalog(message: impl Into<String>) -> Self {
        Self::CatalogInconsistency(message.into())
    }
}
