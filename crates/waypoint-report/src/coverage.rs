use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use waypoint_graph::{NavGraph, Transition};

use crate::record::WalkResult;

/// Node and transition coverage across every walk in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageStats {
    pub nodes_visited: usize,
    pub total_nodes: usize,
    /// Distinct `(from, to)` pairs observed in walk paths. Not clamped to
    /// the declared set: a misbehaving executor can surface undeclared
    /// pairs, and those belong in the report.
    pub transitions_covered: usize,
    pub total_transitions: usize,
    /// Visited-node fraction, in `[0, 1]`.
    pub percentage: f64,
}

impl CoverageStats {
    /// Reduces walk paths into distinct-node and distinct-transition counts
    /// against the graph's declared totals.
    pub fn collect(graph: &NavGraph, walks: &[WalkResult]) -> CoverageStats {
        let mut visited = HashSet::new();
        let mut observed = HashSet::new();
        for walk in walks {
            for node in &walk.path {
                visited.insert(node);
            }
            for pair in walk.path.windows(2) {
                observed.insert(Transition {
                    from: pair[0].clone(),
                    to: pair[1].clone(),
                });
            }
        }

        let total_nodes = graph.node_count();
        let percentage = if total_nodes > 0 {
            visited.len() as f64 / total_nodes as f64
        } else {
            0.0
        };

        CoverageStats {
            nodes_visited: visited.len(),
            total_nodes,
            transitions_covered: observed.len(),
            total_transitions: graph.transition_count(),
            percentage,
        }
    }
}
