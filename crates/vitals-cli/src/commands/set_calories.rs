//! The `set-calories` command: propagate a calorie value by food name.

use anyhow::Result;

use vitals_engine::Engine;
use vitals_store::Store;

pub async fn run(engine: &Engine<Store>, name: String, calories: f64, quiet: bool) -> Result<()> {
    let changed = engine.set_calories_for_name(name.clone(), calories).await?;
    if !quiet {
        if changed == 0 {
            println!("No samples named {:?}", name);
        } else {
            println!("Set {:.0} kcal on {} sample(s) named {:?}", calories, changed, name);
        }
    }
    Ok(())
}
