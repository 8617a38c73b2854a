//! Run controller service.
//!
//! Owns the full lifecycle of a run from `start` to a terminal state. Drives
//! the iteration engine on a periodic tick from a single spawned task, keeps
//! the iteration history, enforces the iteration cap and the convergence
//! threshold, and publishes a read-only snapshot after every tick.
//!
//! Cancellation is deterministic: all state mutation happens under one write
//! lock and every tick re-checks the run status inside that lock, so once
//! `stop()` returns (or a terminal state is reached) no further iteration
//! can be appended, even if a stale tick is already queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::{watch, Mutex, RwLock};
use uuid::Uuid;

use crate::domain::models::{
    EngineConfig, Iteration, ResonanceData, RunSnapshot, RunStatus, Subgoal,
};

use super::iteration_engine::IterationEngine;
use super::subgoal_generator::SubgoalGenerator;

/// Mutable state of the current run, owned exclusively by the controller.
struct RunState {
    run_id: Uuid,
    goal: String,
    constraints: Vec<String>,
    status: RunStatus,
    subgoals: Vec<Subgoal>,
    resonance: ResonanceData,
    iterations: Vec<Iteration>,
    /// Number of the most recently started iteration.
    current_iteration: u32,
    /// Number the next tick will run as.
    next_iteration: u32,
    started_at: DateTime<Utc>,
    rng: ChaCha8Rng,
}

impl RunState {
    fn idle(rng: ChaCha8Rng) -> Self {
        Self {
            run_id: Uuid::nil(),
            goal: String::new(),
            constraints: Vec::new(),
            status: RunStatus::Idle,
            subgoals: Vec::new(),
            resonance: ResonanceData::default(),
            iterations: Vec::new(),
            current_iteration: 0,
            next_iteration: 1,
            started_at: Utc::now(),
            rng,
        }
    }

    fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            run_id: self.run_id,
            goal: self.goal.clone(),
            constraints: self.constraints.clone(),
            status: self.status,
            is_processing: self.status.is_running(),
            is_converging: self.status.is_running(),
            subgoals: self.subgoals.clone(),
            resonance_data: self.resonance.clone(),
            iterations: self.iterations.clone(),
            current_iteration: self.current_iteration,
            started_at: self.started_at,
        }
    }

    /// Set a new status if the transition is legal; stale or duplicate
    /// requests are ignored.
    fn transition_to(&mut self, new_status: RunStatus) {
        if self.status.can_transition_to(new_status) {
            self.status = new_status;
        }
    }
}

/// Controller that drives runs of the resonance engine.
///
/// At most one run is live per controller; starting a new run fully cancels
/// the previous schedule before installing its own, so iteration cycles
/// never overlap.
pub struct RunController {
    config: EngineConfig,
    generator: Arc<SubgoalGenerator>,
    engine: IterationEngine,
    state: Arc<RwLock<RunState>>,
    snapshot_tx: Arc<watch::Sender<RunSnapshot>>,
    running: Arc<AtomicBool>,
    tick_handle: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl RunController {
    /// Create a controller with the builtin subgoal pool.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_generator(config, SubgoalGenerator::new())
    }

    /// Create a controller with a custom generator (used by tests to shrink
    /// the pool below the 3-subgoal combination minimum).
    pub fn with_generator(config: EngineConfig, generator: SubgoalGenerator) -> Self {
        let engine = IterationEngine::new(config.convergence_threshold);
        let rng = seeded_rng(config.seed);
        let (snapshot_tx, _) = watch::channel(RunSnapshot::idle());

        Self {
            config,
            generator: Arc::new(generator),
            engine,
            state: Arc::new(RwLock::new(RunState::idle(rng))),
            snapshot_tx: Arc::new(snapshot_tx),
            running: Arc::new(AtomicBool::new(false)),
            tick_handle: Mutex::new(None),
        }
    }

    /// Begin a run for `goal`.
    ///
    /// Resets the iteration history, regenerates the subgoal set, and
    /// schedules the first tick after the configured short delay with
    /// subsequent ticks on the periodic cadence. Any previous schedule is
    /// fully canceled first. Accepts every input, including empty
    /// constraints.
    pub async fn start(&self, goal: impl Into<String>, constraints: Vec<String>) {
        let goal = goal.into();

        // Cancel any live schedule before installing a new one
        self.cancel_schedule().await;

        {
            let mut state = self.state.write().await;
            state.run_id = Uuid::new_v4();
            state.goal.clone_from(&goal);
            state.constraints = constraints;
            state.subgoals.clear();
            state.resonance = ResonanceData::default();
            state.iterations.clear();
            state.current_iteration = 1;
            state.next_iteration = 1;
            state.started_at = Utc::now();
            state.rng = seeded_rng(self.config.seed);
            state.transition_to(RunStatus::Running);

            let state = &mut *state;
            state.subgoals = self
                .generator
                .generate(&state.goal, &state.constraints, &mut state.rng);

            tracing::info!(
                run_id = %state.run_id,
                goal = %state.goal,
                subgoals = state.subgoals.len(),
                "run started"
            );
            self.snapshot_tx.send_replace(state.snapshot());
        }

        self.running.store(true, Ordering::SeqCst);
        let handle = self.spawn_tick_loop();
        *self.tick_handle.lock().await = Some(handle);
    }

    /// Cancel the active run.
    ///
    /// Idempotent: calling while idle or already terminal is a no-op. After
    /// this returns, no further iteration will be appended.
    pub async fn stop(&self) {
        if self.cancel_schedule().await {
            let snapshot = self.state.read().await.snapshot();
            tracing::info!(run_id = %snapshot.run_id, "run stopped");
            self.snapshot_tx.send_replace(snapshot);
        }
    }

    /// A read-only snapshot of the current run state.
    pub async fn snapshot(&self) -> RunSnapshot {
        self.state.read().await.snapshot()
    }

    /// Subscribe to snapshots published after each tick.
    pub fn subscribe(&self) -> watch::Receiver<RunSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Whether the periodic schedule is currently live.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Tear down the live schedule, if any. Returns true if a running run
    /// was stopped by this call.
    async fn cancel_schedule(&self) -> bool {
        self.running.store(false, Ordering::SeqCst);

        let was_running = {
            let mut state = self.state.write().await;
            if state.status.is_running() {
                state.transition_to(RunStatus::Stopped);
                true
            } else {
                false
            }
        };

        if let Some(handle) = self.tick_handle.lock().await.take() {
            handle.abort();
        }

        was_running
    }

    /// Spawn the periodic tick task for the current run.
    fn spawn_tick_loop(&self) -> tokio::task::JoinHandle<()> {
        let state = self.state.clone();
        let engine = self.engine.clone();
        let snapshot_tx = self.snapshot_tx.clone();
        let running = self.running.clone();
        let max_iterations = self.config.max_iterations;
        let first_delay = Duration::from_millis(self.config.first_tick_delay_ms);
        let tick_interval = Duration::from_millis(self.config.tick_interval_ms);

        tokio::spawn(async move {
            tokio::time::sleep(first_delay).await;

            while running.load(Ordering::SeqCst) {
                let terminal =
                    Self::run_tick(&state, &engine, &snapshot_tx, max_iterations).await;
                if terminal {
                    running.store(false, Ordering::SeqCst);
                    break;
                }
                tokio::time::sleep(tick_interval).await;
            }
        })
    }

    /// Execute one iteration tick. Returns true when the run reached a
    /// terminal state and the schedule must end.
    async fn run_tick(
        state: &Arc<RwLock<RunState>>,
        engine: &IterationEngine,
        snapshot_tx: &watch::Sender<RunSnapshot>,
        max_iterations: u32,
    ) -> bool {
        let snapshot = {
            let mut state = state.write().await;

            // Stale ticks lose the race against stop() and do nothing
            if !state.status.is_running() {
                return true;
            }

            let iteration_number = state.next_iteration;
            let previous_best = state
                .iterations
                .last()
                .map_or(0.0, |iteration| iteration.best_probability);

            let state = &mut *state;
            let outcome = engine.step(
                &state.goal,
                &state.subgoals,
                iteration_number,
                previous_best,
                &mut state.rng,
            );

            tracing::debug!(
                run_id = %state.run_id,
                iteration = iteration_number,
                best_probability = outcome.iteration.best_probability,
                convergence_rate = outcome.iteration.convergence_rate,
                "iteration complete"
            );

            let converged = outcome.iteration.is_complete;
            state.subgoals = outcome.subgoals;
            state.resonance = outcome.resonance;
            state.iterations.push(outcome.iteration);
            state.current_iteration = iteration_number;

            if converged {
                state.transition_to(RunStatus::Converged);
                tracing::info!(
                    run_id = %state.run_id,
                    iteration = iteration_number,
                    "run converged"
                );
            } else {
                let next = iteration_number + 1;
                if next > max_iterations {
                    state.transition_to(RunStatus::Capped);
                    tracing::info!(
                        run_id = %state.run_id,
                        iterations = iteration_number,
                        "iteration cap reached without convergence"
                    );
                } else {
                    state.next_iteration = next;
                }
            }

            state.snapshot()
        };

        let terminal = snapshot.status.is_terminal();
        snapshot_tx.send_replace(snapshot);
        terminal
    }
}

/// Build the run RNG from an optional fixed seed.
fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
