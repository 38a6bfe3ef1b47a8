//! Async front-end over a sample store.

use std::sync::{Arc, Mutex, PoisonError};

use time::OffsetDateTime;
use tokio::task;

use vitals_types::{DailyValue, MetricKind, NewSample, Sample, WeightUnit, to_canonical, to_display};

use crate::error::Result;
use crate::report::{PeriodSummary, ReportPeriod, change_percent};
use crate::retention::SweepReport;
use crate::traits::SampleStore;
use crate::window::Window;
use crate::{aggregate, resolver, retention, series};

/// Days covered by the chart series.
const CHART_DAYS: u32 = 30;

/// Async wrapper around a [`SampleStore`].
///
/// Each operation runs on the blocking pool and delivers a typed result
/// through the returned future, keeping callers on an async runtime
/// responsive. Dropping the future abandons interest in the result; store
/// I/O already issued still completes.
///
/// Weight values cross this boundary in the caller's display unit and are
/// converted to canonical pounds on the way in and back on the way out.
/// Storage below this type only ever sees pounds.
#[derive(Debug)]
pub struct Engine<S> {
    store: Arc<Mutex<S>>,
}

impl<S> Clone for Engine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: SampleStore + 'static> Engine<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&S) -> Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        task::spawn_blocking(move || {
            let guard = store.lock().unwrap_or_else(PoisonError::into_inner);
            op(&guard)
        })
        .await?
    }

    /// Log a weight reading given in the display unit.
    pub async fn log_weight(
        &self,
        value: f64,
        unit: WeightUnit,
        timestamp: OffsetDateTime,
    ) -> Result<i64> {
        let pounds = to_canonical(value, unit);
        self.run(move |store| store.insert(MetricKind::Weight, NewSample::weight(timestamp, pounds)))
            .await
    }

    /// Log a calorie entry with a known numeric value.
    pub async fn log_calories(&self, calories: f64, timestamp: OffsetDateTime) -> Result<i64> {
        self.run(move |store| {
            store.insert(MetricKind::Calories, NewSample::calories(timestamp, calories))
        })
        .await
    }

    /// Log a calorie entry by food name, resolving the value from the most
    /// recent non-zero sample under that name.
    pub async fn log_calories_by_name(
        &self,
        name: String,
        timestamp: OffsetDateTime,
    ) -> Result<Sample> {
        self.run(move |store| resolver::log_calories_by_name(store, &name, timestamp))
            .await
    }

    /// Log an exercise duration in minutes.
    pub async fn log_exercise(&self, minutes: f64, timestamp: OffsetDateTime) -> Result<i64> {
        self.run(move |store| {
            store.insert(MetricKind::Exercise, NewSample::exercise(timestamp, minutes))
        })
        .await
    }

    /// All samples of a kind, newest first, weight in the display unit.
    pub async fn list(&self, kind: MetricKind, unit: WeightUnit) -> Result<Vec<Sample>> {
        let mut samples = self.run(move |store| store.list_all(kind)).await?;
        if kind == MetricKind::Weight {
            for sample in &mut samples {
                sample.value = to_display(sample.value, unit);
            }
        }
        Ok(samples)
    }

    /// Replace a stored sample. Weight values arrive in the display unit.
    pub async fn update_sample(
        &self,
        kind: MetricKind,
        mut sample: Sample,
        unit: WeightUnit,
    ) -> Result<()> {
        if kind == MetricKind::Weight {
            sample.value = to_canonical(sample.value, unit);
        }
        self.run(move |store| store.update(kind, &sample)).await
    }

    /// Delete a stored sample by id.
    pub async fn delete_sample(&self, kind: MetricKind, id: i64) -> Result<()> {
        self.run(move |store| store.delete(kind, id)).await
    }

    /// Period summary for the window ending at `now`, weight converted to
    /// the display unit.
    pub async fn period_summary(
        &self,
        kind: MetricKind,
        period: ReportPeriod,
        unit: WeightUnit,
        now: OffsetDateTime,
    ) -> Result<PeriodSummary> {
        let mut summary = self
            .run(move |store| crate::report::period_summary(store, kind, period, now))
            .await?;
        if kind == MetricKind::Weight {
            summary.current = to_display(summary.current, unit);
            summary.previous = to_display(summary.previous, unit);
            summary.change_percent = change_percent(summary.previous, summary.current);
        }
        Ok(summary)
    }

    /// Raw period average for an arbitrary window, in canonical units.
    pub async fn period_average(&self, kind: MetricKind, window: Window) -> Result<f64> {
        self.run(move |store| aggregate::period_average(store, kind, window))
            .await
    }

    /// Dense 30-day daily series ending at `now`, weight converted to the
    /// display unit after gap filling.
    pub async fn chart_series(
        &self,
        kind: MetricKind,
        unit: WeightUnit,
        now: OffsetDateTime,
    ) -> Result<Vec<DailyValue>> {
        let window = Window::ending_at(now, CHART_DAYS);
        let mut points = self
            .run(move |store| series::daily_series(store, kind, window))
            .await?;
        if kind == MetricKind::Weight {
            for point in &mut points {
                point.value = to_display(point.value, unit);
            }
        }
        Ok(points)
    }

    /// Delete samples past the retention horizon across all kinds.
    pub async fn sweep_expired(&self, now: OffsetDateTime) -> Result<SweepReport> {
        self.run(move |store| retention::sweep_expired(store, now))
            .await
    }

    /// Overwrite the calorie value of every sample with this name.
    pub async fn set_calories_for_name(&self, name: String, calories: f64) -> Result<u64> {
        self.run(move |store| resolver::propagate_calories(store, &name, calories))
            .await
    }
}
