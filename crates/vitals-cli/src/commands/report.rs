//! The `report` command: weekly and monthly period averages.

use anyhow::Result;
use time::OffsetDateTime;

use vitals_engine::Engine;
use vitals_store::Store;
use vitals_types::{MetricKind, WeightUnit};

use crate::cli::{OutputFormat, Period};
use crate::format;

pub async fn run(
    engine: &Engine<Store>,
    period: Period,
    output: OutputFormat,
    unit: WeightUnit,
) -> Result<()> {
    let now = OffsetDateTime::now_utc();

    let mut summaries = Vec::with_capacity(MetricKind::ALL.len());
    for kind in MetricKind::ALL {
        summaries.push(engine.period_summary(kind, period.into(), unit, now).await?);
    }

    format::print_summaries(period, &summaries, unit, output)
}
