use std::collections::{HashMap, HashSet};

use waypoint_routes::{Action, Node};

/// An ordered `(from, to)` pair between two nodes.
///
/// Transitions are coverage bookkeeping only; the action-indexed adjacency
/// lives on [`NavGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition {
    pub from: Node,
    pub to: Node,
}

/// The immutable navigation model.
///
/// Node and transition sets are computed once at build time as the closure
/// of the declared edges plus the root; every query after that is read-only.
#[derive(Debug, Clone)]
pub struct NavGraph {
    pub(crate) root: Node,
    pub(crate) nodes: HashSet<Node>,
    pub(crate) transitions: HashSet<Transition>,
    pub(crate) adjacency: HashMap<Node, Vec<(Action, Node)>>,
}

impl NavGraph {
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn nodes(&self) -> &HashSet<Node> {
        &self.nodes
    }

    pub fn transitions(&self) -> &HashSet<Transition> {
        &self.transitions
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Outgoing edges declared from `node`, in declaration order.
    ///
    /// Unknown and dead-end nodes yield an empty slice, never an error.
    pub fn available_actions(&self, node: &Node) -> &[(Action, Node)] {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The declared destination for `(from, action)`, if any.
    pub fn destination(&self, from: &Node, action: &Action) -> Option<&Node> {
        self.available_actions(from)
            .iter()
            .find(|(declared, _)| declared == action)
            .map(|(_, to)| to)
    }

    /// True only when the adjacency declares exactly `(from, action) -> to`.
    pub fn is_valid_transition(&self, from: &Node, to: &Node, action: &Action) -> bool {
        self.destination(from, action) == Some(to)
    }
}
