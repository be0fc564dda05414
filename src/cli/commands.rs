//! Command implementations for the `rendezvous` binary.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crate::cli::output::TableFormatter;
use crate::domain::models::{EngineConfig, Snapshot};
use crate::infrastructure::ConfigLoader;
use crate::services::ConvergenceEngine;

/// Arguments for `rendezvous predict`.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Path to the snapshot JSON document (agents, venues, captured_at).
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Optional tuning profile (YAML) merged over the reference defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Per-call prediction horizon override, in seconds.
    #[arg(long)]
    pub horizon: Option<f64>,
}

/// Arguments for `rendezvous config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Optional tuning profile (YAML) merged over the reference defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Load the effective configuration for a command.
fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Run one prediction over a snapshot file and print the results.
pub fn predict(args: &PredictArgs, json: bool) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    let horizon = args
        .horizon
        .unwrap_or(config.pairwise.max_prediction_secs);

    let document = fs::read_to_string(&args.snapshot).context(format!(
        "Failed to read snapshot from {}",
        args.snapshot.display()
    ))?;
    let snapshot = Snapshot::from_json(&document)?;

    let engine = ConvergenceEngine::new(config);
    let (results, stats) = engine.predict_with_stats(&snapshot, horizon);

    info!(
        agents = stats.agents_total,
        valid = stats.agents_valid,
        pairs = stats.pairs_examined,
        results = stats.results,
        "prediction finished"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        println!("No convergences predicted.");
    } else {
        println!("{}", TableFormatter::new().format_convergences(&results));
    }
    Ok(())
}

/// Print the effective merged configuration.
pub fn show_config(args: &ConfigArgs, json: bool) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("{}", serde_yaml::to_string(&config)?);
    }
    Ok(())
}
