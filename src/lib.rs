//! Resonator - Iterative Goal Decomposition Engine
//!
//! Resonator simulates an iterative "goal decomposition and resonance"
//! process: a run turns a high-level goal into a fixed set of candidate
//! subgoals, scores every 3-way combination of them with a synthetic
//! resonance metric, and evolves subgoal probabilities on a periodic tick
//! until the best combination crosses the convergence threshold or the
//! iteration cap is hit.
//!
//! Scores are synthetic values evolved by fixed arithmetic rules with
//! injected randomness; the engine performs no real planning or
//! optimization.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure business logic and domain models
//! - **Service Layer** (`services`): Generation, scoring, iteration, and the
//!   run controller
//! - **Infrastructure Layer** (`infrastructure`): Configuration loading
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use resonator::domain::models::EngineConfig;
//! use resonator::services::RunController;
//!
//! #[tokio::main]
//! async fn main() {
//!     let controller = RunController::new(EngineConfig::default());
//!     controller.start("Reverse human aging", vec![]).await;
//!     let mut snapshots = controller.subscribe();
//!     while snapshots.changed().await.is_ok() {
//!         let snapshot = snapshots.borrow_and_update().clone();
//!         if snapshot.status.is_terminal() {
//!             break;
//!         }
//!     }
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    BestCombination, Combination, Config, EngineConfig, Iteration, LoggingConfig, ResonanceData,
    RunSnapshot, RunStatus, Subgoal,
};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    IterationEngine, ResonanceScorer, RunController, SubgoalGenerator, SubgoalPool,
};
