//! The `graph` command: 30-day daily series.

use anyhow::Result;
use time::OffsetDateTime;

use vitals_engine::Engine;
use vitals_store::Store;
use vitals_types::{MetricKind, WeightUnit};

use crate::cli::OutputFormat;
use crate::format;

pub async fn run(
    engine: &Engine<Store>,
    metric: MetricKind,
    output: OutputFormat,
    unit: WeightUnit,
) -> Result<()> {
    let points = engine
        .chart_series(metric, unit, OffsetDateTime::now_utc())
        .await?;
    format::print_series(metric, &points, unit, output)
}
