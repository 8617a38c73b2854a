//! Combination domain models.
//!
//! A combination is a canonicalized triple of subgoals evaluated jointly.
//! Combinations are recomputed from scratch every iteration and never
//! persisted across iterations; only the top ten by probability are retained
//! as that iteration's resonance data.

use serde::{Deserialize, Serialize};

/// A scored 3-way combination of subgoals.
///
/// `subgoal_indices` are three distinct subgoal ids in strictly increasing
/// order. The ordering doubles as the dedup key: each index triple appears at
/// most once per scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    /// Canonical identifier, `"i-j-k"` with `i < j < k`.
    pub id: String,
    /// The member subgoal indices, strictly increasing.
    pub subgoal_indices: [usize; 3],
    /// Joint probability with the resonance boost applied.
    ///
    /// This is a synthetic score, not a probability in the strict sense: the
    /// boost can push it past realistic bounds.
    pub probability: f64,
    /// Mean resonance score of the three members.
    pub resonance_amplitude: f64,
    /// Oscillation frequency in `[0.5, 2.5)`, used only by downstream
    /// visualization. Never participates in ranking.
    pub frequency: f64,
}

impl Combination {
    /// Canonical id for an index triple.
    pub fn canonical_id(indices: [usize; 3]) -> String {
        format!("{}-{}-{}", indices[0], indices[1], indices[2])
    }
}

/// The winning combination of a scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestCombination {
    /// Boosted joint probability of the winning triple.
    pub probability: f64,
    /// Resonance amplitude of the winning triple.
    pub resonance_score: f64,
    /// Member subgoal indices, strictly increasing.
    pub subgoal_indices: [usize; 3],
}

impl From<&Combination> for BestCombination {
    fn from(combination: &Combination) -> Self {
        Self {
            probability: combination.probability,
            resonance_score: combination.resonance_amplitude,
            subgoal_indices: combination.subgoal_indices,
        }
    }
}

/// Result of one scoring pass: the top combinations and the winner.
///
/// `best_combination` is `None` exactly when no triple exists, which only
/// happens with fewer than three subgoals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResonanceData {
    /// Top combinations ordered by probability, highest first. At most ten.
    pub combinations: Vec<Combination>,
    /// The highest-probability combination, if any exists.
    pub best_combination: Option<BestCombination>,
}
