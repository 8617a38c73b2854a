//! Run domain model.
//!
//! A run is one complete start-to-terminal-state execution of the iteration
//! engine for a single goal. The run's state machine is owned by the
//! `RunController`; consumers only ever see read-only snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::combination::ResonanceData;
use super::iteration::Iteration;
use super::subgoal::Subgoal;

/// Status of a run.
///
/// A run is `Running` while the periodic tick schedule is live and moves to
/// exactly one terminal state: `Converged` when the best combination's
/// probability reaches the threshold, `Capped` when the iteration cap is
/// exhausted without convergence, or `Stopped` on user cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// No run has been started yet.
    Idle,
    /// The periodic iteration schedule is live.
    Running,
    /// Terminal: the convergence threshold was reached.
    Converged,
    /// Terminal: the iteration cap was exhausted without convergence.
    Capped,
    /// Terminal: the run was canceled externally.
    Stopped,
}

impl Default for RunStatus {
    fn default() -> Self {
        Self::Idle
    }
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Converged => "converged",
            Self::Capped => "capped",
            Self::Stopped => "stopped",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "idle" => Some(Self::Idle),
            "running" => Some(Self::Running),
            "converged" => Some(Self::Converged),
            "capped" => Some(Self::Capped),
            "stopped" => Some(Self::Stopped),
            _ => None,
        }
    }

    /// Check if this status can transition to another status.
    ///
    /// Terminal states are only left by starting the next run; a restart
    /// while running passes through `Stopped` first so the old schedule is
    /// always canceled before a new one is installed.
    pub fn can_transition_to(&self, new_status: Self) -> bool {
        matches!(
            (self, new_status),
            (Self::Idle, Self::Running)
                | (Self::Running, Self::Converged)
                | (Self::Running, Self::Capped)
                | (Self::Running, Self::Stopped)
                | (Self::Converged, Self::Running)
                | (Self::Capped, Self::Running)
                | (Self::Stopped, Self::Running)
        )
    }

    /// Returns true if this is a terminal state for a run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Converged | Self::Capped | Self::Stopped)
    }

    /// Returns true while the iteration schedule is live.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Read-only snapshot of a run's state, published after every tick.
///
/// Snapshots are passed by value to consumers; nothing in a snapshot aliases
/// the controller's mutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    /// Unique identifier of the run.
    pub run_id: Uuid,
    /// The goal driving the run.
    pub goal: String,
    /// Constraints supplied at start. Accepted but not yet consulted by
    /// generation.
    pub constraints: Vec<String>,
    /// Current run status.
    pub status: RunStatus,
    /// True exactly while the run is `Running`.
    pub is_processing: bool,
    /// True exactly while the run is `Running`.
    pub is_converging: bool,
    /// Current subgoal state.
    pub subgoals: Vec<Subgoal>,
    /// Resonance data from the most recent iteration.
    pub resonance_data: ResonanceData,
    /// Ordered, append-only iteration history.
    pub iterations: Vec<Iteration>,
    /// Number of the most recently completed iteration (0 before the first).
    pub current_iteration: u32,
    /// When the run started.
    pub started_at: DateTime<Utc>,
}

impl RunSnapshot {
    /// An idle snapshot with no run in progress.
    pub fn idle() -> Self {
        Self {
            run_id: Uuid::nil(),
            goal: String::new(),
            constraints: Vec::new(),
            status: RunStatus::Idle,
            is_processing: false,
            is_converging: false,
            subgoals: Vec::new(),
            resonance_data: ResonanceData::default(),
            iterations: Vec::new(),
            current_iteration: 0,
            started_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_status_transitions() {
        assert!(RunStatus::Idle.can_transition_to(RunStatus::Running));
        assert!(RunStatus::Running.can_transition_to(RunStatus::Converged));
        assert!(RunStatus::Running.can_transition_to(RunStatus::Capped));
        assert!(RunStatus::Running.can_transition_to(RunStatus::Stopped));

        // Terminal states restart into Running only
        assert!(RunStatus::Converged.can_transition_to(RunStatus::Running));
        assert!(RunStatus::Capped.can_transition_to(RunStatus::Running));
        assert!(RunStatus::Stopped.can_transition_to(RunStatus::Running));
        assert!(!RunStatus::Converged.can_transition_to(RunStatus::Stopped));

        // No skipping Idle straight to a terminal state
        assert!(!RunStatus::Idle.can_transition_to(RunStatus::Converged));
        assert!(!RunStatus::Idle.can_transition_to(RunStatus::Stopped));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!RunStatus::Idle.is_terminal());
        assert!(!RunStatus::Running.is_terminal());
        assert!(RunStatus::Converged.is_terminal());
        assert!(RunStatus::Capped.is_terminal());
        assert!(RunStatus::Stopped.is_terminal());
    }

    #[test]
    fn test_status_string_round_trip() {
        for status in [
            RunStatus::Idle,
            RunStatus::Running,
            RunStatus::Converged,
            RunStatus::Capped,
            RunStatus::Stopped,
        ] {
            assert_eq!(RunStatus::from_str(status.as_str()), Some(status));
        }
        assert!(RunStatus::from_str("completed").is_none());
    }

    #[test]
    fn test_idle_snapshot() {
        let snapshot = RunSnapshot::idle();
        assert_eq!(snapshot.status, RunStatus::Idle);
        assert!(!snapshot.is_processing);
        assert!(snapshot.iterations.is_empty());
        assert_eq!(snapshot.current_iteration, 0);
    }
}
