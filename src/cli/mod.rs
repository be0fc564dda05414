//! Command-line interface for running predictions against snapshot files.
//!
//! The CLI is presentation only: it decodes a snapshot document, runs the
//! engine once, and renders the results. All semantics live in the library.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// Multi-agent convergence prediction engine.
#[derive(Parser, Debug)]
#[command(name = "rendezvous", version, about)]
pub struct Cli {
    /// Emit machine-readable JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict convergences from a snapshot document.
    Predict(commands::PredictArgs),
    /// Print the effective engine configuration.
    Config(commands::ConfigArgs),
}
