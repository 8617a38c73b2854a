//! Command-line interface for the resonance engine.

use clap::{Parser, Subcommand};

pub mod commands;
pub mod output;

// Re-export commonly used items
pub use output::{status_label, TableFormatter};

/// Top-level CLI parser.
#[derive(Parser)]
#[command(name = "resonator")]
#[command(about = "Resonator - iterative goal decomposition engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Start a run and drive it to a terminal state
    Run(commands::run::RunArgs),

    /// Show the builtin subgoal pool
    Pool(commands::pool::PoolArgs),
}

/// Report a command error and exit with a non-zero status.
pub fn handle_error(err: anyhow::Error, json: bool) {
    if json {
        let payload = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{payload}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
