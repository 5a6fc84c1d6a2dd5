use tracing::warn;

use waypoint_graph::NavGraph;
use waypoint_report::{CrashReport, InvalidRoute, WalkResult};

use crate::executor::{ActionExecutor, ActionOutcome};
use crate::rng::WalkRng;

/// One bounded-depth randomized traversal from the graph root.
pub(crate) struct Walker<'a, E> {
    graph: &'a NavGraph,
    executor: &'a mut E,
    rng: WalkRng,
    max_depth: usize,
    backtrack_probability: f64,
}

impl<'a, E: ActionExecutor> Walker<'a, E> {
    pub(crate) fn new(
        graph: &'a NavGraph,
        executor: &'a mut E,
        rng: WalkRng,
        max_depth: usize,
        backtrack_probability: f64,
    ) -> Walker<'a, E> {
        Walker {
            graph,
            executor,
            rng,
            max_depth,
            backtrack_probability,
        }
    }

    pub(crate) fn run(mut self, iteration: u64) -> WalkResult {
        let root = self.graph.root().clone();
        let mut current = root.clone();
        let mut path = vec![root];
        let mut invalid_routes = Vec::new();
        let mut crash = None;

        for _ in 0..self.max_depth {
            // 1. Dead end: nothing is declared from here.
            let actions = self.graph.available_actions(&current);
            if actions.is_empty() {
                break;
            }

            // 2. Pick an action uniformly.
            let (picked, _) = &actions[self.rng.pick_index(actions.len())];
            let action = picked.clone();

            // 3. Attempt the transition.
            match self.executor.perform(&current, &action) {
                ActionOutcome::Success(next) => {
                    // 4. Advance, flagging executors that leave the declared
                    //    graph.
                    if !self.graph.is_valid_transition(&current, &next, &action) {
                        warn!(from = %current, action = %action, landed = %next,
                            "executor disagreed with the declared graph");
                        invalid_routes.push(InvalidRoute {
                            from: current.clone(),
                            action: action.clone(),
                            reason: format!(
                                "executor returned `{}`, which is not the declared destination",
                                next
                            ),
                        });
                    }
                    path.push(next.clone());
                    current = next;
                }
                ActionOutcome::Invalid(reason) => {
                    // 5. Rejected: record it and retry from the same node.
                    invalid_routes.push(InvalidRoute {
                        from: current.clone(),
                        action,
                        reason,
                    });
                }
                ActionOutcome::Crashed(error) => {
                    // 6. Crash: record it and stop this walk.
                    crash = Some(CrashReport::new(iteration, path.clone(), action, error));
                    break;
                }
            }

            // 7. Backtrack coin, flipped after every surviving step so the
            //    per-step draws stay fixed even when the path is too short
            //    to pop.
            if self.rng.coin(self.backtrack_probability) && path.len() > 1 {
                path.pop();
                current = path
                    .last()
                    .cloned()
                    .unwrap_or_else(|| self.graph.root().clone());
            }
        }

        WalkResult {
            iteration,
            path,
            invalid_routes,
            crash,
        }
    }
}
