//! Error types for vitals-engine.

use thiserror::Error;
use time::OffsetDateTime;
use vitals_types::MetricKind;

/// Result type alias using vitals-engine's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the aggregation engine.
///
/// Zero days with data is not an error anywhere in the engine; every
/// aggregation defines its result as 0 for an empty window.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An aggregation window with `end <= start`. Rejected before the store
    /// is queried.
    #[error("invalid window: end ({end}) must be after start ({start})")]
    InvalidRange {
        /// Window start.
        start: OffsetDateTime,
        /// Window end.
        end: OffsetDateTime,
    },

    /// Update or delete referenced a sample id the store does not have.
    #[error("no {kind} sample with id {id}")]
    NotFound {
        /// The metric kind that was addressed.
        kind: MetricKind,
        /// The missing id.
        id: i64,
    },

    /// Failure propagated unchanged from the store backend. The engine
    /// performs no retries; aggregations are safe to simply re-request.
    #[error("store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A background task was cancelled or panicked before delivering its
    /// result.
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    /// Wrap a backend failure.
    pub fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Store(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_invalid_range_display() {
        let err = Error::InvalidRange {
            start: datetime!(2024-03-08 00:00:00 UTC),
            end: datetime!(2024-03-01 00:00:00 UTC),
        };
        let msg = err.to_string();
        assert!(msg.contains("invalid window"));
        assert!(msg.contains("2024-03-01"));
    }

    #[test]
    fn test_not_found_display() {
        let err = Error::NotFound {
            kind: MetricKind::Weight,
            id: 42,
        };
        assert_eq!(err.to_string(), "no weight sample with id 42");
    }

    #[test]
    fn test_store_wrapping_preserves_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err = Error::store(io);
        assert!(err.to_string().contains("disk gone"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
