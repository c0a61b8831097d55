//! Error types for calendar store access.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading a calendar store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be opened or read (missing, unreadable, corrupt).
    #[error("cannot open calendar store {}: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The store opened but matches none of the known layouts.
    #[error("unrecognized calendar store layout in {}: {reason}", .path.display())]
    UnknownLayout { path: PathBuf, reason: String },

    /// A query failed after the store was opened.
    #[error("calendar store query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

impl StoreError {
    /// Creates an unavailable-store error.
    pub fn unavailable(path: impl AsRef<Path>, source: rusqlite::Error) -> Self {
        Self::Unavailable {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates an unknown-layout error.
    pub fn unknown_layout(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::UnknownLayout {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }
}
