//! Subgoal generation service.
//!
//! Produces the initial subgoal set for a run from a fixed textual pool,
//! with randomized starting scores. Generation is total: given a non-empty
//! pool it always succeeds.

use rand::Rng;

use crate::domain::models::Subgoal;

/// Builtin pool of candidate subgoal texts, one subgoal per entry.
const DEFAULT_POOL: [&str; 10] = [
    "Develop nanobots for telomere restoration and cellular rejuvenation",
    "Create mitochondrial repair systems for energy optimization",
    "Engineer molecular-level oxidative stress reduction mechanisms",
    "Build neural interface systems for neurogenesis stimulation",
    "Design immune system nanobots for chronic inflammation elimination",
    "Develop self-replicating nanobot maintenance networks",
    "Create glucose-to-energy conversion systems for autonomous power",
    "Engineer DNA repair mechanisms with real-time error correction",
    "Build organ-nanobot communication protocols for system integration",
    "Design entropy-reversing metabolic processes for cellular regeneration",
];

/// A fixed, ordered pool of subgoal texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubgoalPool {
    entries: Vec<String>,
}

impl Default for SubgoalPool {
    fn default() -> Self {
        Self {
            entries: DEFAULT_POOL.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl SubgoalPool {
    /// Create a pool from custom entries, preserving their order.
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// Number of entries in the pool.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pool has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The pool texts in order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

/// Service that generates the initial subgoal set for a run.
#[derive(Debug, Clone, Default)]
pub struct SubgoalGenerator {
    pool: SubgoalPool,
}

impl SubgoalGenerator {
    /// Create a generator backed by the builtin pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator backed by a custom pool.
    pub fn with_pool(pool: SubgoalPool) -> Self {
        Self { pool }
    }

    /// The pool this generator draws from.
    pub fn pool(&self) -> &SubgoalPool {
        &self.pool
    }

    /// Generate the subgoal set for a run.
    ///
    /// One subgoal per pool entry, in pool order, with ids `0..N-1`. Initial
    /// probabilities are drawn from `[0.001, 0.101)` and resonance scores
    /// from `[0.1, 2.1)`; every subgoal starts inactive.
    ///
    /// Known limitation: `goal` and `constraints` are accepted but do not
    /// yet influence the generated set.
    pub fn generate<R: Rng>(
        &self,
        _goal: &str,
        _constraints: &[String],
        rng: &mut R,
    ) -> Vec<Subgoal> {
        self.pool
            .entries()
            .iter()
            .enumerate()
            .map(|(id, text)| {
                Subgoal::new(
                    id,
                    text.clone(),
                    rng.gen_range(0.001..0.101),
                    rng.gen_range(0.1..2.1),
                )
            })
            .collect()
    }
}
