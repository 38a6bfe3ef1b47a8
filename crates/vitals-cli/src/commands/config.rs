//! The `config` command: inspect and update the config file.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::cli::ConfigAction;
use crate::config::Config;

pub fn run(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", Config::path().display());
        }
        ConfigAction::Show => {
            let config = Config::load();
            print!("{}", toml::to_string_pretty(&config).context("Failed to serialize config")?);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load();
            match key.as_str() {
                "weight-unit" => config.weight_unit = value.parse()?,
                "database" => config.database = Some(PathBuf::from(value)),
                other => bail!(
                    "unknown config key {:?} (expected weight-unit or database)",
                    other
                ),
            }
            config.save()?;
            println!("Updated {}", key);
        }
    }
    Ok(())
}
