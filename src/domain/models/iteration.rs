//! Iteration domain model.
//!
//! One record per engine iteration, appended to the run's ordered history.
//! Records are never mutated after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded iteration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Iteration {
    /// Sequential iteration number, starting at 1.
    pub id: u32,
    /// The run's goal, constant across the run.
    pub goal: String,
    /// Probability of the best combination found this iteration.
    pub best_probability: f64,
    /// Resonance amplitude of the best combination (0 when none exists).
    pub resonance_score: f64,
    /// Signed delta of `best_probability` against the previous iteration.
    /// Zero for the first iteration. Informational only; termination is
    /// threshold-based on `best_probability`.
    pub convergence_rate: f64,
    /// Whether `best_probability` reached the convergence threshold.
    pub is_complete: bool,
    /// When this iteration was recorded.
    pub recorded_at: DateTime<Utc>,
}
