//! Run CLI command.
//!
//! Starts a run for the given goal and drives it to a terminal state,
//! rendering live iteration progress and the final subgoal, combination, and
//! iteration tables. The command is a pure consumer of the controller's
//! snapshots; it never touches run state directly.

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::cli::output::{status_label, TableFormatter};
use crate::domain::models::{RunSnapshot, RunStatus};
use crate::infrastructure::config::ConfigLoader;
use crate::services::RunController;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// The goal to decompose
    pub goal: String,

    /// Constraints on the goal (repeatable)
    #[arg(short, long = "constraint")]
    pub constraints: Vec<String>,

    /// Seed for the run's random source (makes the run reproducible)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the iteration tick interval in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Override the delay before the first iteration in milliseconds
    #[arg(long)]
    pub first_tick_ms: Option<u64>,
}

/// Execute the run command.
pub async fn execute(args: RunArgs, json: bool) -> Result<()> {
    let mut config = ConfigLoader::load().context("Failed to load configuration")?;

    if args.seed.is_some() {
        config.engine.seed = args.seed;
    }
    if let Some(interval_ms) = args.interval_ms {
        config.engine.tick_interval_ms = interval_ms;
    }
    if let Some(first_tick_ms) = args.first_tick_ms {
        config.engine.first_tick_delay_ms = first_tick_ms;
    }
    ConfigLoader::validate(&config).context("Invalid configuration after CLI overrides")?;

    let max_iterations = config.engine.max_iterations;
    let controller = RunController::new(config.engine);
    let mut snapshots = controller.subscribe();

    controller.start(args.goal, args.constraints).await;

    let spinner = if json { None } else { Some(iteration_spinner()) };

    let terminal = loop {
        snapshots
            .changed()
            .await
            .context("Run controller dropped its snapshot channel")?;
        let snapshot = snapshots.borrow_and_update().clone();

        if let (Some(spinner), Some(iteration)) = (&spinner, snapshot.iterations.last()) {
            spinner.set_message(format!(
                "iteration {}/{} · best probability {:.6}",
                iteration.id, max_iterations, iteration.best_probability
            ));
        }

        if snapshot.status.is_terminal() {
            break snapshot;
        }
    };

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&terminal)?);
        return Ok(());
    }

    render_summary(&terminal);
    Ok(())
}

/// Render the terminal snapshot as human-readable tables.
fn render_summary(snapshot: &RunSnapshot) {
    let formatter = TableFormatter::new();

    println!("\nGoal: {}", snapshot.goal);
    if !snapshot.constraints.is_empty() {
        println!("Constraints: {}", snapshot.constraints.join("; "));
    }
    println!(
        "Outcome: {} after {} iteration(s)\n",
        status_label(snapshot.status),
        snapshot.iterations.len()
    );

    println!("Subgoals:");
    println!("{}\n", formatter.format_subgoals(&snapshot.subgoals));

    if snapshot.resonance_data.combinations.is_empty() {
        println!("No 3-way combinations exist for this subgoal set.\n");
    } else {
        println!("Top combinations (final iteration):");
        println!(
            "{}\n",
            formatter.format_combinations(&snapshot.resonance_data.combinations)
        );
    }

    println!("Iteration history:");
    println!("{}", formatter.format_iterations(&snapshot.iterations));

    if snapshot.status == RunStatus::Converged {
        if let Some(best) = &snapshot.resonance_data.best_combination {
            println!(
                "\nConverged on combination {:?} with probability {:.6}",
                best.subgoal_indices, best.probability
            );
        }
    }
}

/// Spinner shown while iterations are in flight.
fn iteration_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message("waiting for first iteration");
    spinner
}
