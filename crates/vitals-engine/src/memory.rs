//! In-memory store implementation.
//!
//! A complete [`SampleStore`] backed by plain vectors, used by the engine's
//! own tests and anywhere a throwaway store is handy. Day grouping uses the
//! same UTC calendar the SQLite backend groups by.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use time::{Date, OffsetDateTime, UtcOffset};

use vitals_types::{DayAggregate, MetricKind, NewSample, Sample};

use crate::error::{Error, Result};
use crate::traits::SampleStore;
use crate::window::Window;

#[derive(Debug, Default)]
struct Inner {
    weight: Vec<Sample>,
    calories: Vec<Sample>,
    exercise: Vec<Sample>,
    next_id: i64,
}

impl Inner {
    fn samples(&self, kind: MetricKind) -> &Vec<Sample> {
        match kind {
            MetricKind::Weight => &self.weight,
            MetricKind::Calories => &self.calories,
            MetricKind::Exercise => &self.exercise,
        }
    }

    fn samples_mut(&mut self, kind: MetricKind) -> &mut Vec<Sample> {
        match kind {
            MetricKind::Weight => &mut self.weight,
            MetricKind::Calories => &mut self.calories,
            MetricKind::Exercise => &mut self.exercise,
        }
    }
}

/// In-memory [`SampleStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn in_window(sample: &Sample, window: Window) -> bool {
    sample.timestamp >= window.start() && sample.timestamp < window.end()
}

// Group by the UTC calendar regardless of the timestamp's offset, the same
// day key the SQLite backend derives.
fn utc_day(timestamp: OffsetDateTime) -> Date {
    timestamp.to_offset(UtcOffset::UTC).date()
}

impl SampleStore for MemoryStore {
    fn insert(&self, kind: MetricKind, sample: NewSample) -> Result<i64> {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.samples_mut(kind).push(Sample {
            id,
            timestamp: sample.timestamp,
            value: sample.value,
            name: sample.name,
        });
        Ok(id)
    }

    fn update(&self, kind: MetricKind, sample: &Sample) -> Result<()> {
        let mut inner = self.lock();
        let existing = inner
            .samples_mut(kind)
            .iter_mut()
            .find(|candidate| candidate.id == sample.id)
            .ok_or(Error::NotFound {
                kind,
                id: sample.id,
            })?;
        *existing = sample.clone();
        Ok(())
    }

    fn delete(&self, kind: MetricKind, id: i64) -> Result<()> {
        let mut inner = self.lock();
        let samples = inner.samples_mut(kind);
        let before = samples.len();
        samples.retain(|sample| sample.id != id);
        if samples.len() == before {
            return Err(Error::NotFound { kind, id });
        }
        Ok(())
    }

    fn delete_before(&self, kind: MetricKind, cutoff: OffsetDateTime) -> Result<u64> {
        let mut inner = self.lock();
        let samples = inner.samples_mut(kind);
        let before = samples.len();
        samples.retain(|sample| sample.timestamp >= cutoff);
        Ok((before - samples.len()) as u64)
    }

    fn list_all(&self, kind: MetricKind) -> Result<Vec<Sample>> {
        let inner = self.lock();
        let mut samples = inner.samples(kind).clone();
        samples.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(samples)
    }

    fn sum_in_range(&self, kind: MetricKind, window: Window) -> Result<f64> {
        let inner = self.lock();
        Ok(inner
            .samples(kind)
            .iter()
            .filter(|sample| in_window(sample, window))
            .map(|sample| sample.value)
            .sum())
    }

    fn average_in_range(&self, kind: MetricKind, window: Window) -> Result<f64> {
        let inner = self.lock();
        let values: Vec<f64> = inner
            .samples(kind)
            .iter()
            .filter(|sample| in_window(sample, window))
            .map(|sample| sample.value)
            .collect();
        if values.is_empty() {
            return Ok(0.0);
        }
        Ok(values.iter().sum::<f64>() / values.len() as f64)
    }

    fn days_with_data(&self, kind: MetricKind, window: Window) -> Result<u32> {
        let inner = self.lock();
        let days: std::collections::BTreeSet<Date> = inner
            .samples(kind)
            .iter()
            .filter(|sample| in_window(sample, window))
            .map(|sample| utc_day(sample.timestamp))
            .collect();
        Ok(days.len() as u32)
    }

    fn daily_aggregates(&self, kind: MetricKind, window: Window) -> Result<BTreeMap<Date, f64>> {
        let inner = self.lock();
        let mut grouped: BTreeMap<Date, Vec<f64>> = BTreeMap::new();
        for sample in inner
            .samples(kind)
            .iter()
            .filter(|sample| in_window(sample, window))
        {
            grouped
                .entry(utc_day(sample.timestamp))
                .or_default()
                .push(sample.value);
        }

        let aggregated = grouped
            .into_iter()
            .map(|(day, values)| {
                let value = match kind.day_aggregate() {
                    DayAggregate::Sum => values.iter().sum(),
                    DayAggregate::Average => values.iter().sum::<f64>() / values.len() as f64,
                };
                (day, value)
            })
            .collect();

        Ok(aggregated)
    }

    fn most_recent_nonzero_calories(&self, name: &str) -> Result<Option<Sample>> {
        let inner = self.lock();
        Ok(inner
            .calories
            .iter()
            .filter(|sample| {
                sample.value > 0.0
                    && sample
                        .name
                        .as_deref()
                        .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
            })
            .max_by_key(|sample| sample.timestamp)
            .cloned())
    }

    fn set_calories_for_name(&self, name: &str, calories: f64) -> Result<u64> {
        let mut inner = self.lock();
        let mut changed = 0;
        for sample in inner
            .calories
            .iter_mut()
            .filter(|sample| sample.name.as_deref() == Some(name))
        {
            sample.value = calories;
            changed += 1;
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;
    use time::macros::datetime;

    #[test]
    fn test_insert_assigns_unique_ids() {
        let store = MemoryStore::new();
        let ts = datetime!(2024-03-01 08:00:00 UTC);
        let a = store
            .insert(MetricKind::Weight, NewSample::weight(ts, 180.0))
            .unwrap();
        let b = store
            .insert(MetricKind::Calories, NewSample::calories(ts, 500.0))
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let store = MemoryStore::new();
        let sample = Sample {
            id: 99,
            timestamp: datetime!(2024-03-01 08:00:00 UTC),
            value: 180.0,
            name: None,
        };
        assert!(matches!(
            store.update(MetricKind::Weight, &sample),
            Err(Error::NotFound { id: 99, .. })
        ));
    }

    #[test]
    fn test_delete_missing_id_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.delete(MetricKind::Exercise, 7),
            Err(Error::NotFound { id: 7, .. })
        ));
    }

    #[test]
    fn test_list_all_newest_first() {
        let store = MemoryStore::new();
        let base = datetime!(2024-03-01 08:00:00 UTC);
        store
            .insert(MetricKind::Exercise, NewSample::exercise(base, 20.0))
            .unwrap();
        store
            .insert(
                MetricKind::Exercise,
                NewSample::exercise(base + Duration::days(1), 40.0),
            )
            .unwrap();

        let all = store.list_all(MetricKind::Exercise).unwrap();
        assert_eq!(all[0].value, 40.0);
        assert_eq!(all[1].value, 20.0);
    }

    #[test]
    fn test_kinds_are_isolated() {
        let store = MemoryStore::new();
        let ts = datetime!(2024-03-01 08:00:00 UTC);
        store
            .insert(MetricKind::Weight, NewSample::weight(ts, 180.0))
            .unwrap();

        assert!(store.list_all(MetricKind::Calories).unwrap().is_empty());
        assert_eq!(store.list_all(MetricKind::Weight).unwrap().len(), 1);
    }
}
