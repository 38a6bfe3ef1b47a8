//! Retention sweep for samples past the storage horizon.

use time::{Duration, OffsetDateTime};
use tracing::info;

use vitals_types::MetricKind;

use crate::error::Result;
use crate::traits::SampleStore;

/// Samples older than this many days are swept.
pub const RETENTION_DAYS: i64 = 61;

/// Per-kind deleted counts from one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Weight samples deleted.
    pub weight: u64,
    /// Calorie samples deleted.
    pub calories: u64,
    /// Exercise samples deleted.
    pub exercise: u64,
}

impl SweepReport {
    /// Total samples deleted across all kinds.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.weight + self.calories + self.exercise
    }
}

/// Delete all samples of every kind older than `now - 61 days`.
///
/// Idempotent: sweeping an already-clean store deletes nothing and returns
/// zero counts. This function holds no "already ran" state; gating it to
/// once per startup is the caller's concern, and the caller should persist
/// its marker only after this returns `Ok` so a crash mid-sweep retries on
/// the next start instead of silently skipping.
pub fn sweep_expired<S: SampleStore + ?Sized>(store: &S, now: OffsetDateTime) -> Result<SweepReport> {
    let cutoff = now - Duration::days(RETENTION_DAYS);

    let report = SweepReport {
        weight: store.delete_before(MetricKind::Weight, cutoff)?,
        calories: store.delete_before(MetricKind::Calories, cutoff)?,
        exercise: store.delete_before(MetricKind::Exercise, cutoff)?,
    };

    info!(
        %cutoff,
        weight = report.weight,
        calories = report.calories,
        exercise = report.exercise,
        "retention sweep complete"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use time::macros::datetime;
    use vitals_types::NewSample;

    #[test]
    fn test_sweep_keeps_60d_removes_62d() {
        let store = MemoryStore::new();
        let now = datetime!(2024-03-15 12:00:00 UTC);

        let kept = store
            .insert(
                MetricKind::Weight,
                NewSample::weight(now - Duration::days(60), 175.0),
            )
            .unwrap();
        store
            .insert(
                MetricKind::Weight,
                NewSample::weight(now - Duration::days(62), 177.0),
            )
            .unwrap();

        let report = sweep_expired(&store, now).unwrap();
        assert_eq!(report.weight, 1);
        assert_eq!(report.total(), 1);

        let remaining = store.list_all(MetricKind::Weight).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept);
    }

    #[test]
    fn test_second_sweep_is_noop() {
        let store = MemoryStore::new();
        let now = datetime!(2024-03-15 12:00:00 UTC);
        store
            .insert(
                MetricKind::Calories,
                NewSample::calories(now - Duration::days(90), 500.0),
            )
            .unwrap();

        assert_eq!(sweep_expired(&store, now).unwrap().calories, 1);
        assert_eq!(sweep_expired(&store, now).unwrap(), SweepReport::default());
    }

    #[test]
    fn test_sweep_covers_all_kinds() {
        let store = MemoryStore::new();
        let now = datetime!(2024-03-15 12:00:00 UTC);
        let old = now - Duration::days(70);

        store
            .insert(MetricKind::Weight, NewSample::weight(old, 175.0))
            .unwrap();
        store
            .insert(MetricKind::Calories, NewSample::calories(old, 500.0))
            .unwrap();
        store
            .insert(MetricKind::Exercise, NewSample::exercise(old, 30.0))
            .unwrap();

        let report = sweep_expired(&store, now).unwrap();
        assert_eq!(
            report,
            SweepReport {
                weight: 1,
                calories: 1,
                exercise: 1
            }
        );
    }
}
