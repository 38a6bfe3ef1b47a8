//! Error types for vitals-store.

use std::path::PathBuf;

use vitals_types::MetricKind;

/// Result type for vitals-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vitals-store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Failed to create the database directory.
    #[error("failed to create database directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Update or delete referenced a sample id that is not in the database.
    #[error("no {kind} sample with id {id}")]
    SampleNotFound { kind: MetricKind, id: i64 },

    /// A day key produced by SQLite could not be parsed back into a date.
    #[error("invalid stored day key {value:?}: {source}")]
    InvalidDayKey {
        value: String,
        source: time::error::Parse,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Error> for vitals_engine::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::SampleNotFound { kind, id } => vitals_engine::Error::NotFound { kind, id },
            other => vitals_engine::Error::store(other),
        }
    }
}
