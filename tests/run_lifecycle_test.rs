//! Integration tests for the run controller lifecycle.
//!
//! These exercise the full timed loop against real tokio timers with short
//! tick intervals:
//! - convergence stops the schedule and records a complete final iteration
//! - the iteration cap produces exactly `max_iterations` records
//! - `stop()` is idempotent and nothing is appended after it returns
//! - restarting cancels the previous schedule
//! - a sub-minimum subgoal pool never produces combinations or convergence

use std::time::Duration;

use resonator::domain::models::{EngineConfig, RunStatus};
use resonator::services::{RunController, SubgoalGenerator, SubgoalPool};

fn fast_config() -> EngineConfig {
    EngineConfig {
        first_tick_delay_ms: 5,
        tick_interval_ms: 10,
        max_iterations: 20,
        convergence_threshold: 0.95,
        seed: Some(42),
    }
}

/// Wait until the run leaves the Running state, with a generous timeout.
async fn wait_for_terminal(controller: &RunController) -> RunStatus {
    let mut snapshots = controller.subscribe();
    tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            let status = snapshots.borrow_and_update().status;
            if status.is_terminal() {
                return status;
            }
            snapshots.changed().await.expect("snapshot channel closed");
        }
    })
    .await
    .expect("run did not reach a terminal state in time")
}

#[tokio::test]
async fn test_run_converges_and_stops_scheduling() {
    // A threshold below any attainable best probability converges on the
    // first iteration
    let config = EngineConfig {
        convergence_threshold: 1e-12,
        ..fast_config()
    };
    let controller = RunController::new(config);
    controller.start("converge instantly", vec![]).await;

    let status = wait_for_terminal(&controller).await;
    assert_eq!(status, RunStatus::Converged);

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.iterations.len(), 1);
    assert_eq!(snapshot.iterations[0].id, 1);
    assert_eq!(snapshot.iterations[0].convergence_rate, 0.0);
    assert!(snapshot.iterations[0].is_complete);
    assert!(!snapshot.is_processing);
    assert!(!snapshot.is_converging);

    // No further iteration may be scheduled after convergence
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(controller.snapshot().await.iterations.len(), 1);
    assert!(!controller.is_running());
}

#[tokio::test]
async fn test_run_without_convergence_caps_at_twenty_iterations() {
    // An unattainable threshold forces the cap path
    let config = EngineConfig {
        convergence_threshold: 10.0,
        ..fast_config()
    };
    let controller = RunController::new(config);
    controller.start("never converges", vec![]).await;

    let status = wait_for_terminal(&controller).await;
    assert_eq!(status, RunStatus::Capped);

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.iterations.len(), 20);
    assert_eq!(snapshot.current_iteration, 20);
    assert!(snapshot.iterations.iter().all(|it| !it.is_complete));

    // Ids are sequential starting at 1
    let ids: Vec<u32> = snapshot.iterations.iter().map(|it| it.id).collect();
    assert_eq!(ids, (1..=20).collect::<Vec<_>>());

    // The 21st iteration never starts
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(controller.snapshot().await.iterations.len(), 20);
}

#[tokio::test]
async fn test_convergence_rate_tracks_best_probability_deltas() {
    let config = EngineConfig {
        convergence_threshold: 10.0,
        max_iterations: 6,
        ..fast_config()
    };
    let controller = RunController::new(config);
    controller.start("delta check", vec![]).await;
    wait_for_terminal(&controller).await;

    let snapshot = controller.snapshot().await;
    let iterations = &snapshot.iterations;
    assert_eq!(iterations[0].convergence_rate, 0.0);
    for pair in iterations.windows(2) {
        let expected = pair[1].best_probability - pair[0].best_probability;
        assert!((pair[1].convergence_rate - expected).abs() < 1e-12);
    }
}

#[tokio::test]
async fn test_stop_halts_iteration_and_is_idempotent() {
    let config = EngineConfig {
        convergence_threshold: 10.0,
        max_iterations: 1_000,
        ..fast_config()
    };
    let controller = RunController::new(config);
    controller.start("long run", vec![]).await;

    // Let a few iterations land first
    let mut snapshots = controller.subscribe();
    tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            if snapshots.borrow_and_update().iterations.len() >= 3 {
                break;
            }
            snapshots.changed().await.expect("snapshot channel closed");
        }
    })
    .await
    .expect("iterations did not accumulate in time");

    controller.stop().await;
    let after_stop = controller.snapshot().await;
    assert_eq!(after_stop.status, RunStatus::Stopped);
    assert!(!after_stop.is_processing);

    // Nothing is appended once stop() has returned
    let recorded = after_stop.iterations.len();
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(controller.snapshot().await.iterations.len(), recorded);

    // A second stop leaves the same terminal state behind
    controller.stop().await;
    let after_second = controller.snapshot().await;
    assert_eq!(after_second.status, RunStatus::Stopped);
    assert_eq!(after_second.iterations.len(), recorded);
}

#[tokio::test]
async fn test_restart_cancels_previous_schedule() {
    let config = EngineConfig {
        convergence_threshold: 10.0,
        max_iterations: 1_000,
        ..fast_config()
    };
    let controller = RunController::new(config);
    controller.start("first", vec![]).await;

    // Wait for the first run to produce at least one iteration
    let mut snapshots = controller.subscribe();
    tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            if !snapshots.borrow_and_update().iterations.is_empty() {
                break;
            }
            snapshots.changed().await.expect("snapshot channel closed");
        }
    })
    .await
    .expect("first run produced no iterations");

    controller.start("second", vec![]).await;

    // Every iteration recorded from here on belongs to the second run
    tokio::time::sleep(Duration::from_millis(80)).await;
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.goal, "second");
    assert!(snapshot.iterations.iter().all(|it| it.goal == "second"));

    controller.stop().await;
}

#[tokio::test]
async fn test_two_subgoal_pool_never_produces_combinations() {
    let pool = SubgoalPool::new(vec!["alpha".to_string(), "beta".to_string()]);
    let config = EngineConfig {
        max_iterations: 5,
        ..fast_config()
    };
    let controller = RunController::with_generator(config, SubgoalGenerator::with_pool(pool));
    controller.start("tiny pool", vec![]).await;

    let status = wait_for_terminal(&controller).await;
    // With no best combination the threshold is unreachable; only the cap
    // (or a manual stop) ends the run
    assert_eq!(status, RunStatus::Capped);

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.subgoals.len(), 2);
    assert_eq!(snapshot.iterations.len(), 5);
    assert!(snapshot.resonance_data.combinations.is_empty());
    assert!(snapshot.resonance_data.best_combination.is_none());
    for iteration in &snapshot.iterations {
        assert_eq!(iteration.best_probability, 0.0);
        assert!(!iteration.is_complete);
    }
}

#[tokio::test]
async fn test_snapshots_publish_after_every_tick() {
    let config = EngineConfig {
        convergence_threshold: 10.0,
        max_iterations: 4,
        ..fast_config()
    };
    let controller = RunController::new(config);
    let mut snapshots = controller.subscribe();
    controller.start("observable", vec![]).await;

    let mut seen = Vec::new();
    tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            snapshots.changed().await.expect("snapshot channel closed");
            let snapshot = snapshots.borrow_and_update().clone();
            seen.push(snapshot.iterations.len());
            if snapshot.status.is_terminal() {
                break;
            }
        }
    })
    .await
    .expect("run did not finish in time");

    // History only ever grows (watch may coalesce bursts, never reorder)
    for pair in seen.windows(2) {
        assert!(pair[1] >= pair[0]);
    }
    assert_eq!(*seen.last().expect("at least one snapshot"), 4);
}
