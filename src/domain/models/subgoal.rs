//! Subgoal domain model.
//!
//! Subgoals are candidate sub-objectives produced once per run by the
//! generator. Their feasibility probability and resonance score evolve every
//! iteration; the set itself is fixed for the lifetime of a run and replaced
//! wholesale when the next run starts.

use serde::{Deserialize, Serialize};

/// A candidate sub-objective with an evolving feasibility probability.
///
/// `id` is a stable index into the run's subgoal list (`0..N-1`), which is
/// also how combinations refer to their members. `is_active` marks membership
/// in the current best combination and is recomputed on every iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subgoal {
    /// Stable index within the run's subgoal list.
    pub id: usize,
    /// Descriptive label drawn from the generation pool.
    pub text: String,
    /// Feasibility probability, evolved multiplicatively each iteration.
    pub probability: f64,
    /// Resonance score used to compute combination amplitudes.
    pub resonance_score: f64,
    /// Whether this subgoal is part of the current best combination.
    pub is_active: bool,
}

impl Subgoal {
    /// Create a new inactive subgoal with the given initial scores.
    pub fn new(id: usize, text: impl Into<String>, probability: f64, resonance_score: f64) -> Self {
        Self {
            id,
            text: text.into(),
            probability,
            resonance_score,
            is_active: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subgoal_creation() {
        let subgoal = Subgoal::new(3, "Repair mitochondria", 0.05, 1.2);
        assert_eq!(subgoal.id, 3);
        assert_eq!(subgoal.text, "Repair mitochondria");
        assert!(!subgoal.is_active);
    }

    #[test]
    fn test_subgoal_serde_round_trip() {
        let subgoal = Subgoal::new(0, "Test", 0.01, 0.5);
        let json = serde_json::to_string(&subgoal).unwrap();
        let back: Subgoal = serde_json::from_str(&json).unwrap();
        assert_eq!(subgoal, back);
    }
}
