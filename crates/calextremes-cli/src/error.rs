//! Export error types.

use std::io;
use std::path::{Path, PathBuf};

use calextremes_store::StoreError;
use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur while exporting a report.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The calendar store could not be read.
    #[error(transparent)]
    Source(#[from] StoreError),

    /// The report could not be written.
    #[error("cannot write report {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row does not have as many fields as the header.
    #[error("row {row} has {found} fields, header has {expected}")]
    RowArity {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ExportError {
    /// Creates a write error for the given destination.
    pub fn write(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
