//! The `list` command: show recorded samples.

use anyhow::Result;

use vitals_engine::Engine;
use vitals_store::Store;
use vitals_types::{MetricKind, WeightUnit};

use crate::cli::OutputFormat;
use crate::format;

pub async fn run(
    engine: &Engine<Store>,
    metric: MetricKind,
    limit: Option<usize>,
    output: OutputFormat,
    unit: WeightUnit,
) -> Result<()> {
    let mut samples = engine.list(metric, unit).await?;
    if let Some(limit) = limit {
        samples.truncate(limit);
    }
    format::print_samples(metric, &samples, unit, output)
}
