//! Output formatting for text and JSON.

use anyhow::Result;
use serde_json::json;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use vitals_engine::PeriodSummary;
use vitals_types::{DailyValue, MetricKind, Sample, WeightUnit};

use crate::cli::{OutputFormat, Period};

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

/// Width of the widest bar in the text graph.
const BAR_WIDTH: usize = 40;

/// Print a sample listing.
pub fn print_samples(
    kind: MetricKind,
    samples: &[Sample],
    unit: WeightUnit,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(samples)?),
        OutputFormat::Text => {
            if samples.is_empty() {
                println!("No {} samples recorded", kind);
                return Ok(());
            }
            let label = kind.unit_label(unit);
            for sample in samples {
                let when = sample.timestamp.format(TIMESTAMP_FORMAT)?;
                match &sample.name {
                    Some(name) => {
                        println!(
                            "{:>6}  {}  {:>8.2} {}  {}",
                            sample.id, when, sample.value, label, name
                        );
                    }
                    None => {
                        println!("{:>6}  {}  {:>8.2} {}", sample.id, when, sample.value, label);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Print per-metric period summaries.
pub fn print_summaries(
    period: Period,
    summaries: &[PeriodSummary],
    unit: WeightUnit,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let entries: Vec<_> = summaries
                .iter()
                .map(|s| {
                    json!({
                        "metric": s.kind.to_string(),
                        "unit": s.kind.unit_label(unit),
                        "current": s.current,
                        "previous": s.previous,
                        "change_percent": s.change_percent,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            let title = match period {
                Period::Weekly => "Weekly averages (vs previous 7 days)",
                Period::Monthly => "Monthly averages (vs previous 30 days)",
            };
            println!("{}", title);
            for s in summaries {
                println!(
                    "  {:<10} {:>10.2} {:<5} previous {:>10.2}  change {}",
                    s.kind.to_string(),
                    s.current,
                    s.kind.unit_label(unit),
                    s.previous,
                    format_change(s.change_percent),
                );
            }
        }
    }
    Ok(())
}

/// Print a dense daily series, as a text bar chart or JSON.
pub fn print_series(
    kind: MetricKind,
    points: &[DailyValue],
    unit: WeightUnit,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(points)?),
        OutputFormat::Text => {
            let label = kind.unit_label(unit);
            let max = points.iter().map(|p| p.value).fold(0.0_f64, f64::max);
            for point in points {
                let bar = bar(point.value, max);
                println!("{}  {:>9.2} {}  {}", point.day, point.value, label, bar);
            }
        }
    }
    Ok(())
}

/// Render a percentage change, "n/a" when there is no baseline.
pub fn format_change(change: Option<f64>) -> String {
    match change {
        Some(percent) => format!("{:+.1}%", percent),
        None => "n/a".to_string(),
    }
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let width = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(width.min(BAR_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(Some(10.0)), "+10.0%");
        assert_eq!(format_change(Some(-2.5)), "-2.5%");
        assert_eq!(format_change(None), "n/a");
    }

    #[test]
    fn test_bar_scales_to_max() {
        assert_eq!(bar(10.0, 10.0).len(), BAR_WIDTH);
        assert_eq!(bar(5.0, 10.0).len(), BAR_WIDTH / 2);
        assert_eq!(bar(0.0, 10.0), "");
        assert_eq!(bar(10.0, 0.0), "");
    }
}
