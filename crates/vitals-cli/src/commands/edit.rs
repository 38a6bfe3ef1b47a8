//! The `edit` and `delete` commands.

use anyhow::{Result, anyhow, bail};

use vitals_engine::Engine;
use vitals_store::Store;
use vitals_types::{MetricKind, WeightUnit};

pub async fn edit(
    engine: &Engine<Store>,
    metric: MetricKind,
    id: i64,
    value: f64,
    name: Option<String>,
    unit: WeightUnit,
    quiet: bool,
) -> Result<()> {
    if name.is_some() && metric != MetricKind::Calories {
        bail!("--name only applies to calorie samples");
    }

    // Listed values are already in the display unit, and the update path
    // converts back, so the new value is given in the display unit too.
    let samples = engine.list(metric, unit).await?;
    let mut sample = samples
        .into_iter()
        .find(|s| s.id == id)
        .ok_or_else(|| anyhow!("no {} sample with id {}", metric, id))?;

    sample.value = value;
    if let Some(name) = name {
        sample.name = Some(name);
    }

    engine.update_sample(metric, sample, unit).await?;
    if !quiet {
        println!("Updated {} sample {}", metric, id);
    }
    Ok(())
}

pub async fn delete(
    engine: &Engine<Store>,
    metric: MetricKind,
    id: i64,
    quiet: bool,
) -> Result<()> {
    engine.delete_sample(metric, id).await?;
    if !quiet {
        println!("Deleted {} sample {}", metric, id);
    }
    Ok(())
}
