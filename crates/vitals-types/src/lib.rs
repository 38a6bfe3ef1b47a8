//! Shared data types for the vitals health tracker.
//!
//! This crate provides the types shared by the aggregation engine, the
//! SQLite store, and the CLI:
//!
//! - Sample records for the three tracked metrics
//! - The [`MetricKind`] tag used to select a metric in store and engine calls
//! - Weight unit handling and lb/kg conversion
//!
//! # Example
//!
//! ```
//! use vitals_types::{MetricKind, NewSample, WeightUnit};
//! use time::OffsetDateTime;
//!
//! let sample = NewSample::weight(OffsetDateTime::now_utc(), 180.5);
//! assert_eq!(MetricKind::Weight.to_string(), "weight");
//! ```

pub mod error;
pub mod types;
pub mod units;

pub use error::{ParseError, ParseResult};
pub use types::{DailyValue, DayAggregate, MetricKind, NewSample, Sample};
pub use units::{LBS_PER_KG, WeightUnit, to_canonical, to_display};
