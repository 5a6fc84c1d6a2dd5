use serde::{Deserialize, Serialize};

use waypoint_routes::{Action, Node};

use crate::severity::{NavError, Severity};

/// A rejected transition attempt: the graph and the executor disagreed
/// about a route.
///
/// Diagnoses declaration/action mismatches, not necessarily code defects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidRoute {
    pub from: Node,
    pub action: Action,
    pub reason: String,
}

/// One failed transition, with everything needed to replay it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrashReport {
    pub iteration: u64,
    /// The nodes visited up to and including the one the crash happened on.
    pub path: Vec<Node>,
    pub action: Action,
    pub error: NavError,
    pub severity: Severity,
}

impl CrashReport {
    /// Builds a report for `error`, deriving its severity.
    pub fn new(iteration: u64, path: Vec<Node>, action: Action, error: NavError) -> CrashReport {
        let severity = error.severity();
        CrashReport {
            iteration,
            path,
            action,
            error,
            severity,
        }
    }
}

/// Everything one randomized walk produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkResult {
    pub iteration: u64,
    /// The nodes actually visited, starting at the root.
    pub path: Vec<Node>,
    pub invalid_routes: Vec<InvalidRoute>,
    /// At most one crash; it always ends the walk.
    pub crash: Option<CrashReport>,
}
