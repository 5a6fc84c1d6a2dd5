use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use waypoint_graph::NavGraph;
use waypoint_report::{FuzzingReport, Severity, StopReason, WalkResult};

use crate::executor::ActionExecutor;
use crate::rng::WalkRng;
use crate::walk::Walker;

/// Session tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzConfig {
    /// Steps attempted per walk before it is cut off. Default 10.
    pub max_depth: usize,
    /// Walks per session, barring an early stop on a critical crash.
    /// Default 1000.
    pub max_iterations: u64,
    /// Session seed. `None` draws a fresh one, which the report surfaces so
    /// any failure can still be replayed.
    pub seed: Option<u64>,
    /// Probability of popping the path after a surviving step. Clamped to
    /// `[0, 1]` at use. Default 0.5.
    pub backtrack_probability: f64,
}

impl Default for FuzzConfig {
    fn default() -> FuzzConfig {
        FuzzConfig {
            max_depth: 10,
            max_iterations: 1000,
            seed: None,
            backtrack_probability: 0.5,
        }
    }
}

// ── Sequential session ───────────────────────────────────────────────

/// Runs up to `max_iterations` walks against one executor.
///
/// Never fails: executor misbehavior lands in the report, not in a
/// `Result`. The session stops early only when a walk ends in a critical
/// crash.
pub fn run_session<E: ActionExecutor>(
    graph: &NavGraph,
    executor: &mut E,
    config: &FuzzConfig,
) -> FuzzingReport {
    let seed = config.seed.unwrap_or_else(rand::random);
    let timer = Instant::now();
    let mut walks: Vec<WalkResult> = Vec::new();
    let mut stop_reason = StopReason::Completed;

    for iteration in 0..config.max_iterations {
        let rng = WalkRng::for_walk(seed, iteration);
        let walker = Walker::new(
            graph,
            executor,
            rng,
            config.max_depth,
            config.backtrack_probability,
        );
        let result = walker.run(iteration);
        debug!(
            iteration,
            path_len = result.path.len(),
            invalid = result.invalid_routes.len(),
            crashed = result.crash.is_some(),
            "walk finished"
        );

        let critical = matches!(&result.crash, Some(c) if c.severity == Severity::Critical);
        walks.push(result);
        if critical {
            warn!(iteration, "critical crash, stopping the session early");
            stop_reason = StopReason::CriticalCrash;
            break;
        }
    }

    finish(graph, seed, timer, stop_reason, walks)
}

// ── Parallel session ─────────────────────────────────────────────────

/// Runs walks across the rayon pool, one executor per walk.
///
/// Each walk draws from its own generator forked off `(seed, iteration)`,
/// and results come back in iteration order regardless of completion order,
/// so a parallel session is as replayable as a sequential one. The
/// early-stop rule is applied by truncating past the first critical crash.
pub fn run_session_parallel<E, F>(
    graph: &NavGraph,
    make_executor: F,
    config: &FuzzConfig,
) -> FuzzingReport
where
    E: ActionExecutor,
    F: Fn(u64) -> E + Sync,
{
    let seed = config.seed.unwrap_or_else(rand::random);
    let timer = Instant::now();

    let mut walks: Vec<WalkResult> = (0..config.max_iterations)
        .into_par_iter()
        .map(|iteration| {
            let mut executor = make_executor(iteration);
            let rng = WalkRng::for_walk(seed, iteration);
            Walker::new(
                graph,
                &mut executor,
                rng,
                config.max_depth,
                config.backtrack_probability,
            )
            .run(iteration)
        })
        .collect();

    let mut stop_reason = StopReason::Completed;
    let first_critical = walks
        .iter()
        .position(|walk| matches!(&walk.crash, Some(c) if c.severity == Severity::Critical));
    if let Some(index) = first_critical {
        warn!(
            iteration = index,
            dropped = walks.len() - index - 1,
            "critical crash, dropping the walks after it"
        );
        walks.truncate(index + 1);
        stop_reason = StopReason::CriticalCrash;
    }

    finish(graph, seed, timer, stop_reason, walks)
}

fn finish(
    graph: &NavGraph,
    seed: u64,
    timer: Instant,
    stop_reason: StopReason,
    walks: Vec<WalkResult>,
) -> FuzzingReport {
    let report = FuzzingReport::from_walks(graph, seed, timer.elapsed(), stop_reason, walks);
    info!(
        seed = report.seed,
        walks = report.walks_executed,
        crashes = report.crashes.len(),
        invalid_routes = report.invalid_routes.len(),
        node_coverage = report.coverage.percentage,
        "session finished"
    );
    report
}
