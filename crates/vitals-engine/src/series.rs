//! Dense daily series for charting.

use tracing::debug;

use vitals_types::{DailyValue, MetricKind};

use crate::error::Result;
use crate::traits::SampleStore;
use crate::window::Window;

/// A dense, gap-filled series with one entry per calendar day of the
/// window, ascending.
///
/// Days with samples carry their per-day aggregate (sum for calories and
/// exercise, average for weight). Days without samples carry the plain
/// arithmetic mean of the days that do have data, a simpler estimator than
/// the coverage-adjusted period average, chosen for visual continuity of
/// the chart line. A window with no data at all fills every day with 0.
pub fn daily_series<S: SampleStore + ?Sized>(
    store: &S,
    kind: MetricKind,
    window: Window,
) -> Result<Vec<DailyValue>> {
    let observed = store.daily_aggregates(kind, window)?;

    let filler = if observed.is_empty() {
        // Mean of an empty set is undefined; the series historically falls
        // back to a flat 0 line rather than erroring.
        0.0
    } else {
        observed.values().sum::<f64>() / observed.len() as f64
    };

    debug!(
        %kind,
        observed_days = observed.len(),
        filler,
        "building daily series"
    );

    let series = window
        .days()
        .map(|day| DailyValue {
            day,
            value: observed.get(&day).copied().unwrap_or(filler),
        })
        .collect();

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use time::Duration;
    use time::macros::{date, datetime};
    use vitals_types::NewSample;

    fn window_of(days: i64) -> Window {
        let start = datetime!(2024-03-01 00:00:00 UTC);
        Window::new(start, start + Duration::days(days)).unwrap()
    }

    #[test]
    fn test_full_length_ascending_unique() {
        let store = MemoryStore::new();
        let window = window_of(30);
        store
            .insert(
                MetricKind::Exercise,
                NewSample::exercise(window.start() + Duration::days(3), 45.0),
            )
            .unwrap();

        let series = daily_series(&store, MetricKind::Exercise, window).unwrap();
        assert_eq!(series.len() as i64, window.total_days() + 1);
        assert!(series.windows(2).all(|pair| pair[0].day < pair[1].day));
    }

    #[test]
    fn test_missing_days_get_mean_of_observed() {
        let store = MemoryStore::new();
        let window = window_of(5);
        // Day 0: 300, day 2: 500 -> filler mean is 400.
        store
            .insert(
                MetricKind::Calories,
                NewSample::calories(window.start() + Duration::hours(9), 300.0),
            )
            .unwrap();
        store
            .insert(
                MetricKind::Calories,
                NewSample::calories(window.start() + Duration::days(2), 500.0),
            )
            .unwrap();

        let series = daily_series(&store, MetricKind::Calories, window).unwrap();
        assert_eq!(series[0].value, 300.0);
        assert_eq!(series[1].value, 400.0);
        assert_eq!(series[2].value, 500.0);
        assert_eq!(series[3].value, 400.0);
        assert_eq!(series[4].value, 400.0);
        assert_eq!(series[5].value, 400.0);
    }

    #[test]
    fn test_empty_window_fills_with_zero() {
        let store = MemoryStore::new();
        let series = daily_series(&store, MetricKind::Weight, window_of(30)).unwrap();

        assert_eq!(series.len(), 31);
        assert!(series.iter().all(|point| point.value == 0.0));
    }

    #[test]
    fn test_same_day_samples_aggregate_before_filling() {
        let store = MemoryStore::new();
        let window = window_of(3);
        for value in [200.0, 300.0] {
            store
                .insert(
                    MetricKind::Calories,
                    NewSample::calories(window.start() + Duration::hours(8), value),
                )
                .unwrap();
        }
        // Weight on the same day averages instead of summing.
        for value in [180.0, 184.0] {
            store
                .insert(
                    MetricKind::Weight,
                    NewSample::weight(window.start() + Duration::hours(8), value),
                )
                .unwrap();
        }

        let calories = daily_series(&store, MetricKind::Calories, window).unwrap();
        assert_eq!(calories[0].value, 500.0);

        let weight = daily_series(&store, MetricKind::Weight, window).unwrap();
        assert_eq!(weight[0].value, 182.0);
    }

    #[test]
    fn test_days_match_window_calendar() {
        let store = MemoryStore::new();
        let window = Window::new(
            datetime!(2024-02-28 06:00:00 UTC),
            datetime!(2024-03-01 06:00:00 UTC),
        )
        .unwrap();

        let series = daily_series(&store, MetricKind::Calories, window).unwrap();
        let days: Vec<_> = series.iter().map(|point| point.day).collect();
        assert_eq!(
            days,
            vec![
                date!(2024 - 02 - 28),
                date!(2024 - 02 - 29),
                date!(2024 - 03 - 01)
            ]
        );
    }
}
