//! SQLite persistence for the vitals health tracker.
//!
//! Stores weight, calorie, and exercise samples in a local SQLite database
//! and implements the engine's [`vitals_engine::SampleStore`] interface on
//! top of it.
//!
//! # Example
//!
//! ```no_run
//! use vitals_store::Store;
//! use vitals_types::{MetricKind, NewSample};
//! use time::OffsetDateTime;
//!
//! # fn main() -> vitals_store::Result<()> {
//! let store = Store::open_default()?;
//! store.insert_sample(
//!     MetricKind::Weight,
//!     &NewSample::weight(OffsetDateTime::now_utc(), 180.5),
//! )?;
//! # Ok(())
//! # }
//! ```

mod error;
mod queries;
mod schema;
mod store;

pub use error::{Error, Result};
pub use queries::SampleQuery;
pub use store::Store;

use std::path::PathBuf;

/// Default database path: `<data dir>/vitals/data.db`.
///
/// Falls back to the current directory when the platform data directory
/// cannot be determined.
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vitals")
        .join("data.db")
}
