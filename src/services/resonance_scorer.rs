//! Combination scoring service.
//!
//! Enumerates every strictly increasing 3-way index combination of the
//! current subgoal set, scores each by joint probability with a resonance
//! boost, and ranks them. Scoring is deterministic for a fixed subgoal set;
//! only the per-combination visualization frequency is drawn fresh per call.

use rand::Rng;

use crate::domain::models::{BestCombination, Combination, ResonanceData, Subgoal};

/// Number of top-ranked combinations retained per scoring pass.
const TOP_COMBINATIONS: usize = 10;

/// Weight of the resonance amplitude in the probability boost.
const RESONANCE_BOOST_WEIGHT: f64 = 0.1;

/// Service that scores and ranks subgoal combinations.
#[derive(Debug, Clone)]
pub struct ResonanceScorer {
    retained: usize,
}

impl Default for ResonanceScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ResonanceScorer {
    /// Create a scorer that retains the reference top-10 ranking.
    pub fn new() -> Self {
        Self {
            retained: TOP_COMBINATIONS,
        }
    }

    /// Create a scorer retaining a custom number of top combinations.
    pub fn with_retained(retained: usize) -> Self {
        Self { retained }
    }

    /// Score all 3-way combinations of `subgoals` and rank them.
    ///
    /// For each triple `(i, j, k)` with `i < j < k`:
    /// - joint probability is the product of the three member probabilities,
    /// - resonance amplitude is the mean of the three resonance scores,
    /// - the ranked probability is `joint * (1 + amplitude * 0.1)`.
    ///
    /// The boost makes the ranked value a synthetic score rather than a true
    /// probability. Ranking is a stable descending sort, so ties keep
    /// enumeration order. Returns an empty result with no best combination
    /// when fewer than three subgoals exist.
    pub fn score<R: Rng>(&self, subgoals: &[Subgoal], rng: &mut R) -> ResonanceData {
        let n = subgoals.len();
        let mut combinations = Vec::with_capacity(triple_count(n));

        for i in 0..n {
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    let joint_probability =
                        subgoals[i].probability * subgoals[j].probability * subgoals[k].probability;
                    let resonance_amplitude = (subgoals[i].resonance_score
                        + subgoals[j].resonance_score
                        + subgoals[k].resonance_score)
                        / 3.0;

                    combinations.push(Combination {
                        id: Combination::canonical_id([i, j, k]),
                        subgoal_indices: [i, j, k],
                        probability: joint_probability
                            * (1.0 + resonance_amplitude * RESONANCE_BOOST_WEIGHT),
                        resonance_amplitude,
                        frequency: rng.gen_range(0.5..2.5),
                    });
                }
            }
        }

        // Stable sort: equal probabilities keep enumeration order
        combinations.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        combinations.truncate(self.retained);

        let best_combination = combinations.first().map(BestCombination::from);

        ResonanceData {
            combinations,
            best_combination,
        }
    }
}

/// Number of strictly increasing index triples over `n` elements, C(n, 3).
fn triple_count(n: usize) -> usize {
    if n < 3 {
        0
    } else {
        n * (n - 1) * (n - 2) / 6
    }
}
