//! The store interface the engine aggregates over.

use std::collections::BTreeMap;

use time::{Date, OffsetDateTime};

use vitals_types::{MetricKind, NewSample, Sample};

use crate::error::Result;
use crate::window::Window;

/// Persistence interface required by the aggregation engine.
///
/// Implemented by any backend that can hold timestamped samples per metric
/// kind and answer range aggregates over them. The SQLite backend lives in
/// `vitals-store`; [`crate::MemoryStore`] implements it in memory for tests.
///
/// Methods are synchronous; the async boundary is [`crate::Engine`], which
/// dispatches calls to a blocking pool. Each call is a short-lived,
/// independent operation: no transaction spans multiple calls, and
/// aggregation reads may interleave with writes (read-committed is enough,
/// reports are advisory).
pub trait SampleStore: Send {
    /// Insert a sample, returning the id the store assigned.
    fn insert(&self, kind: MetricKind, sample: NewSample) -> Result<i64>;

    /// Replace the sample with `sample.id`.
    ///
    /// Fails with [`crate::Error::NotFound`] when the id is absent.
    fn update(&self, kind: MetricKind, sample: &Sample) -> Result<()>;

    /// Delete a sample by id.
    ///
    /// Fails with [`crate::Error::NotFound`] when the id is absent.
    fn delete(&self, kind: MetricKind, id: i64) -> Result<()>;

    /// Delete every sample with `timestamp < cutoff`, returning the count.
    ///
    /// Deleting an already-empty range is a no-op returning 0.
    fn delete_before(&self, kind: MetricKind, cutoff: OffsetDateTime) -> Result<u64>;

    /// All samples of a kind, newest first.
    fn list_all(&self, kind: MetricKind) -> Result<Vec<Sample>>;

    /// Sum of sample values inside the window.
    fn sum_in_range(&self, kind: MetricKind, window: Window) -> Result<f64>;

    /// Average of sample values inside the window, 0 when empty.
    fn average_in_range(&self, kind: MetricKind, window: Window) -> Result<f64>;

    /// Count of distinct UTC calendar days inside the window that have at
    /// least one sample. Computed from timestamps, never from sums.
    fn days_with_data(&self, kind: MetricKind, window: Window) -> Result<u32>;

    /// Per-day aggregates inside the window, keyed by UTC calendar day.
    ///
    /// Days without samples are absent from the map. The aggregate per day
    /// follows [`MetricKind::day_aggregate`]: sums for calories and
    /// exercise, averages for weight.
    fn daily_aggregates(&self, kind: MetricKind, window: Window) -> Result<BTreeMap<Date, f64>>;

    /// The most recent calorie sample with the given name (case-insensitive)
    /// and a non-zero calorie value, if any.
    fn most_recent_nonzero_calories(&self, name: &str) -> Result<Option<Sample>>;

    /// Overwrite the calorie value of every sample with exactly this name,
    /// returning how many rows changed.
    fn set_calories_for_name(&self, name: &str, calories: f64) -> Result<u64>;
}
