//! Coverage-adjusted period averages.
//!
//! A user who logs three days out of seven would see a naive weekly average
//! skew low (missing days counted as zero) or high (period length ignored).
//! The coverage-adjusted average imputes each missing day at the average of
//! the days that do have data, then averages over the full period, so a
//! sparse week of ~2000 kcal days still reads as ~2000 kcal.

use tracing::debug;

use vitals_types::{DayAggregate, MetricKind};

use crate::error::Result;
use crate::traits::SampleStore;
use crate::window::Window;

/// One comparable average for the window, compensating for missing days.
///
/// Summed metrics (calories, exercise minutes) get the coverage-adjusted
/// treatment. Weight is naturally an average, not a sum (a day's reading
/// is already representative), so its raw range average is returned without
/// extrapolation.
///
/// A window with no days of data yields 0.
pub fn period_average<S: SampleStore + ?Sized>(
    store: &S,
    kind: MetricKind,
    window: Window,
) -> Result<f64> {
    let days_with_data = store.days_with_data(kind, window)?;
    if days_with_data == 0 {
        return Ok(0.0);
    }

    match kind.day_aggregate() {
        DayAggregate::Sum => {
            let total_sum = store.sum_in_range(kind, window)?;
            let total_days = window.total_days();

            let avg_with_data = total_sum / f64::from(days_with_data);
            let missing_days = total_days - i64::from(days_with_data);
            let adjusted_sum = total_sum + missing_days as f64 * avg_with_data;

            debug!(
                %kind,
                total_sum,
                days_with_data,
                total_days,
                adjusted_sum,
                "coverage-adjusted average"
            );

            Ok(adjusted_sum / total_days as f64)
        }
        DayAggregate::Average => store.average_in_range(kind, window),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use time::Duration;
    use time::macros::datetime;
    use vitals_types::NewSample;

    fn day_window(days: i64) -> Window {
        let start = datetime!(2024-03-01 00:00:00 UTC);
        Window::new(start, start + Duration::days(days)).unwrap()
    }

    #[test]
    fn test_empty_window_is_zero() {
        let store = MemoryStore::new();
        for kind in MetricKind::ALL {
            assert_eq!(period_average(&store, kind, day_window(7)).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_uniform_daily_data_returns_the_value() {
        let store = MemoryStore::new();
        let start = datetime!(2024-03-01 00:00:00 UTC);
        for day in 0..7 {
            store
                .insert(
                    MetricKind::Calories,
                    NewSample::calories(start + Duration::days(day), 2000.0),
                )
                .unwrap();
            store
                .insert(
                    MetricKind::Weight,
                    NewSample::weight(start + Duration::days(day), 170.0),
                )
                .unwrap();
        }

        let window = day_window(7);
        assert_eq!(
            period_average(&store, MetricKind::Calories, window).unwrap(),
            2000.0
        );
        assert_eq!(
            period_average(&store, MetricKind::Weight, window).unwrap(),
            170.0
        );
    }

    #[test]
    fn test_missing_days_imputed_at_observed_average() {
        // calories=[day1:300, day3:500] over 4 days:
        // days_with_data=2, avg_with_data=400, missing=2,
        // adjusted_sum=800+800=1600, average=400.
        let store = MemoryStore::new();
        let start = datetime!(2024-03-01 00:00:00 UTC);
        store
            .insert(
                MetricKind::Calories,
                NewSample::calories(start + Duration::hours(10), 300.0),
            )
            .unwrap();
        store
            .insert(
                MetricKind::Calories,
                NewSample::calories(start + Duration::days(2) + Duration::hours(10), 500.0),
            )
            .unwrap();

        let avg = period_average(&store, MetricKind::Calories, day_window(4)).unwrap();
        assert_eq!(avg, 400.0);
    }

    #[test]
    fn test_uniform_sparse_data_stays_uniform() {
        // 5 of 10 days at 100/day: imputation at the same average keeps
        // the adjusted result at exactly 100.
        let store = MemoryStore::new();
        let start = datetime!(2024-03-01 00:00:00 UTC);
        for day in [0, 2, 4, 6, 8] {
            store
                .insert(
                    MetricKind::Exercise,
                    NewSample::exercise(start + Duration::days(day), 100.0),
                )
                .unwrap();
        }

        let avg = period_average(&store, MetricKind::Exercise, day_window(10)).unwrap();
        assert_eq!(avg, 100.0);
    }

    #[test]
    fn test_weight_is_not_extrapolated() {
        // Two readings on one day out of seven: the raw average, not a
        // coverage-scaled figure.
        let store = MemoryStore::new();
        let start = datetime!(2024-03-01 00:00:00 UTC);
        store
            .insert(MetricKind::Weight, NewSample::weight(start, 180.0))
            .unwrap();
        store
            .insert(
                MetricKind::Weight,
                NewSample::weight(start + Duration::hours(12), 182.0),
            )
            .unwrap();

        let avg = period_average(&store, MetricKind::Weight, day_window(7)).unwrap();
        assert_eq!(avg, 181.0);
    }

    #[test]
    fn test_multiple_samples_on_one_day_count_one_day() {
        let store = MemoryStore::new();
        let start = datetime!(2024-03-01 00:00:00 UTC);
        for hour in [8, 13, 19] {
            store
                .insert(
                    MetricKind::Calories,
                    NewSample::calories(start + Duration::hours(hour), 600.0),
                )
                .unwrap();
        }

        // One day with 1800 kcal over a 3-day window: avg_with_data=1800,
        // two missing days imputed at 1800 each.
        let avg = period_average(&store, MetricKind::Calories, day_window(3)).unwrap();
        assert_eq!(avg, 1800.0);
    }

    #[test]
    fn test_sample_on_window_end_excluded() {
        let store = MemoryStore::new();
        let window = day_window(4);
        store
            .insert(MetricKind::Calories, NewSample::calories(window.end(), 999.0))
            .unwrap();

        assert_eq!(
            period_average(&store, MetricKind::Calories, window).unwrap(),
            0.0
        );
    }
}
