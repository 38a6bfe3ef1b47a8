//! Error types for vitals-types.

use thiserror::Error;

/// Errors that can occur when parsing user-facing text into typed values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// Unknown metric kind name.
    #[error("unknown metric kind: {0:?} (expected weight, calories, or exercise)")]
    UnknownMetricKind(String),

    /// Unknown weight unit name.
    #[error("unknown weight unit: {0:?} (expected lbs or kgs)")]
    UnknownWeightUnit(String),
}

/// Result type alias for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
