//! The `log` command: record a new sample.

use anyhow::Result;

use vitals_engine::Engine;
use vitals_store::Store;
use vitals_types::WeightUnit;

use crate::cli::LogEntry;

use super::resolve_timestamp;

pub async fn run(
    engine: &Engine<Store>,
    entry: LogEntry,
    default_unit: WeightUnit,
    quiet: bool,
) -> Result<()> {
    match entry {
        LogEntry::Weight { value, unit, at } => {
            let unit = unit.unwrap_or(default_unit);
            let timestamp = resolve_timestamp(at.as_deref())?;
            let id = engine.log_weight(value, unit, timestamp).await?;
            if !quiet {
                println!("Logged weight {:.2} {} (id {})", value, unit.label(), id);
            }
        }
        LogEntry::Calories { entry, at } => {
            let timestamp = resolve_timestamp(at.as_deref())?;
            // Numbers are logged directly; anything else is a food name.
            match entry.parse::<f64>() {
                Ok(calories) => {
                    let id = engine.log_calories(calories, timestamp).await?;
                    if !quiet {
                        println!("Logged {:.0} kcal (id {})", calories, id);
                    }
                }
                Err(_) => {
                    let sample = engine.log_calories_by_name(entry.clone(), timestamp).await?;
                    if !quiet {
                        if sample.value > 0.0 {
                            println!(
                                "Logged {:.0} kcal for {:?} (id {})",
                                sample.value, entry, sample.id
                            );
                        } else {
                            println!(
                                "No known calories for {:?}; logged a 0 kcal placeholder (id {})",
                                entry, sample.id
                            );
                            println!("Fill it in with: vitals set-calories {:?} <calories>", entry);
                        }
                    }
                }
            }
        }
        LogEntry::Exercise { minutes, at } => {
            let timestamp = resolve_timestamp(at.as_deref())?;
            let id = engine.log_exercise(minutes, timestamp).await?;
            if !quiet {
                println!("Logged {:.0} minutes of exercise (id {})", minutes, id);
            }
        }
    }
    Ok(())
}
