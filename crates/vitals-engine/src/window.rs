//! Half-open aggregation windows.

use time::{Date, Duration, OffsetDateTime};

use crate::error::{Error, Result};

/// A contiguous half-open time range `[start, end)` used for aggregation.
///
/// Construction validates the range, so every window a store method
/// receives is already known to be non-empty.
///
/// # Example
///
/// ```
/// use vitals_engine::Window;
/// use time::macros::datetime;
///
/// let now = datetime!(2024-03-15 09:30:00 UTC);
/// let current = Window::ending_at(now, 7);
/// let baseline = current.preceding();
///
/// assert_eq!(current.total_days(), 7);
/// assert_eq!(baseline.end(), current.start());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    start: OffsetDateTime,
    end: OffsetDateTime,
}

impl Window {
    /// Create a window, rejecting `end <= start`.
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Result<Self> {
        if end <= start {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The window of the given whole-day length ending at `end`.
    #[must_use]
    pub fn ending_at(end: OffsetDateTime, days: u32) -> Self {
        let days = days.max(1);
        Self {
            start: end - Duration::days(i64::from(days)),
            end,
        }
    }

    /// The adjacent window of equal length ending where this one starts.
    ///
    /// Used as the comparison baseline for period-over-period reports.
    #[must_use]
    pub fn preceding(&self) -> Self {
        let length = self.end - self.start;
        Self {
            start: self.start - length,
            end: self.start,
        }
    }

    /// Inclusive start of the window.
    #[must_use]
    pub fn start(&self) -> OffsetDateTime {
        self.start
    }

    /// Exclusive end of the window.
    #[must_use]
    pub fn end(&self) -> OffsetDateTime {
        self.end
    }

    /// Whole days covered: `floor((end - start) / one_day)`.
    #[must_use]
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).whole_days()
    }

    /// Every UTC calendar day from the window's first day to its last day,
    /// inclusive, ascending.
    pub fn days(&self) -> impl Iterator<Item = Date> + use<> {
        let first = self.start.date();
        let count = self.total_days() + 1;
        (0..count).filter_map(move |offset| first.checked_add(Duration::days(offset)))
    }
}
