use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

use vitals_engine::Engine;
use vitals_store::Store;

mod cli;
mod commands;
mod config;
mod format;

use cli::{Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let quiet = cli.quiet;
    let database_flag = cli.database;

    match cli.command {
        // Config commands never touch the database
        Commands::Config { action } => commands::config::run(action),
        Commands::Log { entry } => {
            let (engine, config) = open_engine(database_flag).await?;
            commands::log::run(&engine, entry, config.weight_unit, quiet).await
        }
        Commands::List {
            metric,
            limit,
            format,
        } => {
            let (engine, config) = open_engine(database_flag).await?;
            commands::list::run(&engine, metric, limit, format, config.weight_unit).await
        }
        Commands::Edit {
            metric,
            id,
            value,
            name,
        } => {
            let (engine, config) = open_engine(database_flag).await?;
            commands::edit::edit(&engine, metric, id, value, name, config.weight_unit, quiet).await
        }
        Commands::Delete { metric, id } => {
            let (engine, _) = open_engine(database_flag).await?;
            commands::edit::delete(&engine, metric, id, quiet).await
        }
        Commands::Report { period, format } => {
            let (engine, config) = open_engine(database_flag).await?;
            commands::report::run(&engine, period, format, config.weight_unit).await
        }
        Commands::Graph { metric, format } => {
            let (engine, config) = open_engine(database_flag).await?;
            commands::graph::run(&engine, metric, format, config.weight_unit).await
        }
        Commands::SetCalories { name, calories } => {
            let (engine, _) = open_engine(database_flag).await?;
            commands::set_calories::run(&engine, name, calories, quiet).await
        }
    }
}

/// Open the store and run the startup sweep, returning the engine and the
/// loaded configuration.
async fn open_engine(database_flag: Option<PathBuf>) -> Result<(Engine<Store>, Config)> {
    let mut config = Config::load();
    let db_path = config::resolve_db_path(database_flag, &config);
    let store = Store::open(&db_path)?;
    let engine = Engine::new(store);

    run_startup_sweep(&engine, &mut config).await?;

    Ok((engine, config))
}

/// Run the retention sweep at most once per calendar day.
///
/// The marker is written back only after the sweep succeeds, so a failed or
/// interrupted sweep retries on the next invocation.
async fn run_startup_sweep(engine: &Engine<Store>, config: &mut Config) -> Result<()> {
    let now = OffsetDateTime::now_utc();
    let today = now.date();
    if config.last_sweep == Some(today) {
        return Ok(());
    }

    let report = engine.sweep_expired(now).await?;
    if report.total() > 0 {
        tracing::info!(
            removed = report.total(),
            "removed samples past the retention horizon"
        );
    }

    config.last_sweep = Some(today);
    config.save()
}
