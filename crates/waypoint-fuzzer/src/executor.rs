use std::time::Duration;

use serde::{Deserialize, Serialize};

use waypoint_graph::NavGraph;
use waypoint_report::NavError;
use waypoint_routes::{Action, Node};

use crate::rng::WalkRng;

/// What one transition attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The system landed on this node.
    Success(Node),
    /// The transition was rejected; the walk continues in place.
    Invalid(String),
    /// The system under test failed; the walk stops here.
    Crashed(NavError),
}

/// Performs one transition attempt against the system under test.
///
/// The engine imposes nothing beyond the three-way outcome and eventual
/// return. Implementations are free to take real time; in the full
/// application this is where the actual navigation layer is driven.
pub trait ActionExecutor {
    fn perform(&mut self, from: &Node, action: &Action) -> ActionOutcome;
}

// ── Simulated execution ──────────────────────────────────────────────

/// Tuning for [`SimulatedExecutor`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Probability of synthesizing a crash on an otherwise valid transition.
    /// Clamped to `[0, 1]` at use. Default 0.01.
    pub crash_probability: f64,
    /// Upper bound on the simulated per-transition latency. Zero skips the
    /// sleep and its random draw entirely. Default 2ms.
    pub max_latency: Duration,
}

impl Default for SimulationConfig {
    fn default() -> SimulationConfig {
        SimulationConfig {
            crash_probability: 0.01,
            max_latency: Duration::from_millis(2),
        }
    }
}

/// Reference executor: resolves transitions against the declared graph,
/// sleeps a bounded random latency, and synthesizes crashes at the
/// configured rate to model a flaky system under test.
///
/// Owns its own random source, offset from the walk seed so its draws never
/// interleave with the walk engine's action and backtrack draws. With a zero
/// crash probability and zero latency it draws nothing and behaves as a pure
/// function of the graph.
#[derive(Debug)]
pub struct SimulatedExecutor<'g> {
    graph: &'g NavGraph,
    rng: WalkRng,
    config: SimulationConfig,
}

impl<'g> SimulatedExecutor<'g> {
    /// Offset separating the executor's stream from the engine's for the
    /// same walk seed.
    const STREAM_OFFSET: u64 = 0x9E3779B97F4A7C15;

    pub fn new(graph: &'g NavGraph, seed: u64) -> SimulatedExecutor<'g> {
        SimulatedExecutor::with_config(graph, seed, SimulationConfig::default())
    }

    pub fn with_config(
        graph: &'g NavGraph,
        seed: u64,
        config: SimulationConfig,
    ) -> SimulatedExecutor<'g> {
        SimulatedExecutor {
            graph,
            rng: WalkRng::new(seed.wrapping_add(Self::STREAM_OFFSET)),
            config,
        }
    }
}

impl ActionExecutor for SimulatedExecutor<'_> {
    fn perform(&mut self, from: &Node, action: &Action) -> ActionOutcome {
        let destination = match self.graph.destination(from, action) {
            Some(node) => node.clone(),
            None => {
                return ActionOutcome::Invalid(format!(
                    "no declared route from `{}` via {}",
                    from, action
                ));
            }
        };

        if !self.config.max_latency.is_zero() {
            let bound = (self.config.max_latency.as_micros() as u64).max(1);
            let micros = self.rng.next_u64() % bound;
            std::thread::sleep(Duration::from_micros(micros));
        }

        if self.rng.coin(self.config.crash_probability) {
            let error = match self.rng.pick_index(3) {
                0 => NavError::fatal(format!("navigating to `{}` brought the app down", destination)),
                1 => NavError::recoverable(format!(
                    "navigation to `{}` timed out and was rolled back",
                    destination
                )),
                _ => NavError::other(format!("navigation to `{}` failed mid-transition", destination)),
            };
            return ActionOutcome::Crashed(error);
        }

        ActionOutcome::Success(destination)
    }
}
