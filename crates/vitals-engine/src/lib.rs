//! Time-series aggregation and gap-filling engine for the vitals tracker.
//!
//! This crate turns a sparse set of timestamped health samples into figures
//! a user can compare and chart despite gaps in logging:
//!
//! - Coverage-adjusted period averages over adjacent windows ([`aggregate`])
//! - Dense gap-filled daily series for charting ([`series`])
//! - Weekly/monthly reports with period-over-period change ([`report`])
//! - A retention sweep deleting samples past the 61-day horizon ([`retention`])
//! - Calorie-by-name resolution reusing previously logged values ([`resolver`])
//!
//! Persistence is abstract: any backend implementing [`SampleStore`] works.
//! [`MemoryStore`] is a complete in-memory implementation used in tests;
//! the `vitals-store` crate provides the SQLite one.
//!
//! The synchronous functions compute directly against a store reference.
//! [`Engine`] wraps a store and runs each operation on the blocking pool,
//! so callers on an async runtime never block; dropping the returned future
//! abandons interest in the result.
//!
//! # Example
//!
//! ```
//! use vitals_engine::{MemoryStore, SampleStore, Window, aggregate};
//! use vitals_types::{MetricKind, NewSample};
//! use time::macros::datetime;
//!
//! let store = MemoryStore::new();
//! store.insert(
//!     MetricKind::Calories,
//!     NewSample::calories(datetime!(2024-03-01 12:00:00 UTC), 1800.0),
//! )?;
//!
//! let window = Window::new(
//!     datetime!(2024-03-01 00:00:00 UTC),
//!     datetime!(2024-03-08 00:00:00 UTC),
//! )?;
//! let average = aggregate::period_average(&store, MetricKind::Calories, window)?;
//! assert_eq!(average, 1800.0);
//! # Ok::<(), vitals_engine::Error>(())
//! ```

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod memory;
pub mod report;
pub mod resolver;
pub mod retention;
pub mod series;
pub mod traits;
pub mod window;

pub use engine::Engine;
pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use report::{PeriodSummary, ReportPeriod, change_percent};
pub use retention::{RETENTION_DAYS, SweepReport};
pub use traits::SampleStore;
pub use window::Window;
