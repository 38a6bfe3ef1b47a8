//! Calorie-by-name resolution.
//!
//! Logging "apple" instead of a number reuses the calories from the most
//! recent non-zero sample recorded under that name. Per name this forms a
//! small lifecycle: unknown -> 0-calorie placeholder -> first real value ->
//! later entries inherit that value until explicitly edited.

use time::OffsetDateTime;
use tracing::debug;

use vitals_types::{MetricKind, NewSample, Sample};

use crate::error::Result;
use crate::traits::SampleStore;

/// Log a calorie entry by name, reusing the most recent non-zero value
/// recorded under that name (case-insensitive).
///
/// When no prior non-zero sample exists the new sample gets 0 calories, a
/// placeholder the user is expected to correct later, at which point future
/// entries under the name inherit the corrected value.
///
/// Returns the inserted sample.
pub fn log_calories_by_name<S: SampleStore + ?Sized>(
    store: &S,
    name: &str,
    timestamp: OffsetDateTime,
) -> Result<Sample> {
    let calories = match store.most_recent_nonzero_calories(name)? {
        Some(prior) => {
            debug!(name, calories = prior.value, prior_id = prior.id, "reusing prior calories");
            prior.value
        }
        None => {
            debug!(name, "no prior value, inserting placeholder");
            0.0
        }
    };

    let sample = NewSample::named_calories(timestamp, calories, name);
    let id = store.insert(MetricKind::Calories, sample.clone())?;

    Ok(Sample {
        id,
        timestamp: sample.timestamp,
        value: sample.value,
        name: sample.name,
    })
}

/// Overwrite the calorie value of every sample with exactly this name.
///
/// Used when the user corrects a placeholder or revises a food's value;
/// returns how many samples changed.
pub fn propagate_calories<S: SampleStore + ?Sized>(
    store: &S,
    name: &str,
    calories: f64,
) -> Result<u64> {
    let changed = store.set_calories_for_name(name, calories)?;
    debug!(name, calories, changed, "propagated calories to named samples");
    Ok(changed)
}
