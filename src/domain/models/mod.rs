//! Domain models for the resonance engine.

pub mod combination;
pub mod config;
pub mod iteration;
pub mod run;
pub mod subgoal;

pub use combination::{BestCombination, Combination, ResonanceData};
pub use config::{Config, EngineConfig, LoggingConfig};
pub use iteration::Iteration;
pub use run::{RunSnapshot, RunStatus};
pub use subgoal::Subgoal;
