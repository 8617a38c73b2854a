//! Service layer: subgoal generation, combination scoring, the iteration
//! engine, and the run controller that drives them.

pub mod iteration_engine;
pub mod resonance_scorer;
pub mod run_controller;
pub mod subgoal_generator;

pub use iteration_engine::{IterationEngine, IterationOutcome};
pub use resonance_scorer::ResonanceScorer;
pub use run_controller::RunController;
pub use subgoal_generator::{SubgoalGenerator, SubgoalPool};
