//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use vitals_engine::ReportPeriod;
use vitals_types::{MetricKind, WeightUnit};

#[derive(Parser)]
#[command(name = "vitals")]
#[command(author, version, about = "Track weight, calories, and exercise from the terminal", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Database file to use instead of the configured one
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new sample
    Log {
        #[command(subcommand)]
        entry: LogEntry,
    },

    /// List recorded samples, newest first
    List {
        /// Metric to list (weight, calories, exercise)
        metric: MetricKind,

        /// Maximum number of samples to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Change a recorded sample
    Edit {
        /// Metric the sample belongs to
        metric: MetricKind,

        /// Sample id, as shown by `list`
        id: i64,

        /// New value, in the display unit for weight
        value: f64,

        /// New food name (calorie samples only)
        #[arg(long)]
        name: Option<String>,
    },

    /// Delete a recorded sample
    Delete {
        /// Metric the sample belongs to
        metric: MetricKind,

        /// Sample id, as shown by `list`
        id: i64,
    },

    /// Period averages for every metric, with change against the
    /// preceding period
    Report {
        /// Report period
        #[arg(short, long, value_enum, default_value = "weekly")]
        period: Period,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Day-by-day series over the last 30 days, gaps filled with the
    /// period mean
    Graph {
        /// Metric to chart
        metric: MetricKind,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Overwrite the calorie value of every sample with this food name
    SetCalories {
        /// Food name, matched exactly
        name: String,

        /// Calories to apply
        calories: f64,
    },

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum LogEntry {
    /// Record a weight reading
    Weight {
        /// Weight in the display unit
        value: f64,

        /// Unit override (lbs, kgs); defaults to the configured unit
        #[arg(short, long)]
        unit: Option<WeightUnit>,

        /// Timestamp (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<String>,
    },

    /// Record calorie intake, by amount or by food name
    Calories {
        /// A number logs that many kcal directly; anything else is treated
        /// as a food name and reuses its most recent non-zero value
        entry: String,

        /// Timestamp (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<String>,
    },

    /// Record exercise minutes
    Exercise {
        /// Duration in minutes
        minutes: f64,

        /// Timestamp (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the config file path
    Path,

    /// Show the current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (weight-unit, database)
        key: String,

        /// New value
        value: String,
    },
}

/// Output format for read commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Machine-readable JSON
    Json,
}

/// Report period argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Period {
    /// The most recent 7 days
    Weekly,
    /// The most recent 30 days
    Monthly,
}

impl From<Period> for ReportPeriod {
    fn from(period: Period) -> Self {
        match period {
            Period::Weekly => ReportPeriod::Weekly,
            Period::Monthly => ReportPeriod::Monthly,
        }
    }
}
