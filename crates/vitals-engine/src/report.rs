//! Weekly and monthly period reports.

use time::OffsetDateTime;

use vitals_types::MetricKind;

use crate::aggregate::period_average;
use crate::error::Result;
use crate::traits::SampleStore;
use crate::window::Window;

/// Supported report periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// The most recent 7 days, compared against the 7 before them.
    Weekly,
    /// The most recent 30 days, compared against the 30 before them.
    Monthly,
}

impl ReportPeriod {
    /// Window length in days.
    #[must_use]
    pub fn days(self) -> u32 {
        match self {
            ReportPeriod::Weekly => 7,
            ReportPeriod::Monthly => 30,
        }
    }
}

/// A period average beside its comparison baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodSummary {
    /// Which metric this summarizes.
    pub kind: MetricKind,
    /// The report period.
    pub period: ReportPeriod,
    /// Average over the most recent window.
    pub current: f64,
    /// Average over the adjacent preceding window of equal length.
    pub previous: f64,
    /// Percentage change from previous to current; `None` when the
    /// previous period was 0 (no meaningful baseline).
    pub change_percent: Option<f64>,
}

/// Percentage change from `previous` to `current`.
///
/// `((current - previous) / |previous|) * 100`, undefined when the baseline
/// is 0.
#[must_use]
pub fn change_percent(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        None
    } else {
        Some((current - previous) / previous.abs() * 100.0)
    }
}

/// Summarize a metric over the window ending at `now`, with its baseline.
pub fn period_summary<S: SampleStore + ?Sized>(
    store: &S,
    kind: MetricKind,
    period: ReportPeriod,
    now: OffsetDateTime,
) -> Result<PeriodSummary> {
    let window = Window::ending_at(now, period.days());

    let current = period_average(store, kind, window)?;
    let previous = period_average(store, kind, window.preceding())?;

    Ok(PeriodSummary {
        kind,
        period,
        current,
        previous,
        change_percent: change_percent(previous, current),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use time::Duration;
    use time::macros::datetime;
    use vitals_types::NewSample;

    #[test]
    fn test_change_percent() {
        assert_eq!(change_percent(100.0, 110.0), Some(10.0));
        assert_eq!(change_percent(200.0, 150.0), Some(-25.0));
        assert_eq!(change_percent(0.0, 500.0), None);
    }

    #[test]
    fn test_weekly_summary_with_baseline() {
        let store = MemoryStore::new();
        let now = datetime!(2024-03-15 09:00:00 UTC);

        // Current week: 2200/day on 7 days. Previous week: 2000/day.
        for day in 0..7 {
            store
                .insert(
                    MetricKind::Calories,
                    NewSample::calories(now - Duration::days(day) - Duration::hours(2), 2200.0),
                )
                .unwrap();
            store
                .insert(
                    MetricKind::Calories,
                    NewSample::calories(now - Duration::days(day + 7) - Duration::hours(2), 2000.0),
                )
                .unwrap();
        }

        let summary =
            period_summary(&store, MetricKind::Calories, ReportPeriod::Weekly, now).unwrap();
        assert_eq!(summary.current, 2200.0);
        assert_eq!(summary.previous, 2000.0);
        let change = summary.change_percent.unwrap();
        assert!((change - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_baseline_has_no_change() {
        let store = MemoryStore::new();
        let now = datetime!(2024-03-15 09:00:00 UTC);
        store
            .insert(
                MetricKind::Exercise,
                NewSample::exercise(now - Duration::days(1), 30.0),
            )
            .unwrap();

        let summary =
            period_summary(&store, MetricKind::Exercise, ReportPeriod::Weekly, now).unwrap();
        assert!(summary.current > 0.0);
        assert_eq!(summary.previous, 0.0);
        assert_eq!(summary.change_percent, None);
    }

    #[test]
    fn test_monthly_windows_are_30_days() {
        assert_eq!(ReportPeriod::Monthly.days(), 30);
        assert_eq!(ReportPeriod::Weekly.days(), 7);
    }
}
