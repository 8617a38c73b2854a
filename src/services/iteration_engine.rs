//! Iteration engine service.
//!
//! One engine step scores the current subgoal set, grows each subgoal's
//! probability depending on whether it belongs to the best combination, and
//! produces the iteration record for the run history. Steps are total
//! functions over well-formed input: they build new state rather than
//! mutating the previous subgoal list.

use rand::Rng;

use crate::domain::models::{Iteration, ResonanceData, Subgoal};

use super::resonance_scorer::ResonanceScorer;

/// Ceiling applied to subgoals selected into the best combination.
///
/// Non-selected subgoals are intentionally NOT clamped: their smaller growth
/// factor can still push them past the ceiling over many iterations. The
/// asymmetry is inherited behavior and must be preserved as-is.
const SELECTED_PROBABILITY_CEILING: f64 = 0.95;

/// Output of one engine step.
#[derive(Debug, Clone)]
pub struct IterationOutcome {
    /// The next subgoal state; the input list is left untouched.
    pub subgoals: Vec<Subgoal>,
    /// Resonance data computed for this step.
    pub resonance: ResonanceData,
    /// The iteration record to append to the run history.
    pub iteration: Iteration,
}

/// Service that advances a run by exactly one iteration.
#[derive(Debug, Clone)]
pub struct IterationEngine {
    scorer: ResonanceScorer,
    convergence_threshold: f64,
}

impl IterationEngine {
    /// Create an engine that completes at the given best-probability
    /// threshold.
    pub fn new(convergence_threshold: f64) -> Self {
        Self {
            scorer: ResonanceScorer::new(),
            convergence_threshold,
        }
    }

    /// The threshold at which an iteration is considered complete.
    pub fn convergence_threshold(&self) -> f64 {
        self.convergence_threshold
    }

    /// Run one iteration over the given subgoal state.
    ///
    /// Subgoals that are members of the best combination become active and
    /// grow by a factor in `[1.2, 1.5)`, clamped at 0.95. All others become
    /// inactive and grow by a factor in `[1.05, 1.15)` with no clamp.
    /// `previous_best` is the prior iteration's best probability and feeds
    /// the convergence rate; it is ignored for the first iteration.
    pub fn step<R: Rng>(
        &self,
        goal: &str,
        subgoals: &[Subgoal],
        iteration_number: u32,
        previous_best: f64,
        rng: &mut R,
    ) -> IterationOutcome {
        let resonance = self.scorer.score(subgoals, rng);

        let best_indices = resonance
            .best_combination
            .as_ref()
            .map(|best| best.subgoal_indices);

        let updated = subgoals
            .iter()
            .map(|subgoal| {
                let selected = best_indices
                    .is_some_and(|indices| indices.contains(&subgoal.id));

                let probability = if selected {
                    (subgoal.probability * rng.gen_range(1.2..1.5))
                        .min(SELECTED_PROBABILITY_CEILING)
                } else {
                    subgoal.probability * rng.gen_range(1.05..1.15)
                };

                Subgoal {
                    probability,
                    is_active: selected,
                    ..subgoal.clone()
                }
            })
            .collect();

        let best_probability = resonance
            .best_combination
            .as_ref()
            .map_or(0.0, |best| best.probability);
        let resonance_score = resonance
            .best_combination
            .as_ref()
            .map_or(0.0, |best| best.resonance_score);
        let convergence_rate = if iteration_number > 1 {
            best_probability - previous_best
        } else {
            0.0
        };

        let iteration = Iteration {
            id: iteration_number,
            goal: goal.to_string(),
            best_probability,
            resonance_score,
            convergence_rate,
            is_complete: best_probability >= self.convergence_threshold,
            recorded_at: chrono::Utc::now(),
        };

        IterationOutcome {
            subgoals: updated,
            resonance,
            iteration,
        }
    }
}
