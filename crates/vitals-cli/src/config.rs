//! Configuration file management.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use time::Date;

use vitals_types::WeightUnit;

time::serde::format_description!(day_format, Date, "[year]-[month]-[day]");

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Weight display unit ("lbs" or "kgs")
    #[serde(default)]
    pub weight_unit: WeightUnit,

    /// Database file override
    #[serde(default)]
    pub database: Option<PathBuf>,

    /// Day of the last completed retention sweep (auto-updated)
    #[serde(default, with = "day_format::option")]
    pub last_sweep: Option<Date>,
}

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vitals")
            .join("config.toml")
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        let path = Self::path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Resolve the database path: flag, then config, then platform default.
pub fn resolve_db_path(flag: Option<PathBuf>, config: &Config) -> PathBuf {
    flag.or_else(|| config.database.clone())
        .unwrap_or_else(vitals_store::default_db_path)
}
