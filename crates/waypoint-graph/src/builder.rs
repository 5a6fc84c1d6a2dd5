use std::collections::{HashMap, HashSet};

use waypoint_routes::{Action, Node, Route};

use crate::graph::{NavGraph, Transition};

/// Problems found while turning route declarations into a graph.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("route {index} has an empty `{field}` id")]
    EmptyNodeId { index: usize, field: &'static str },
    #[error("conflicting routes from `{from}` via {action}: `{first}` vs `{second}`")]
    ConflictingRoute {
        from: String,
        action: String,
        first: String,
        second: String,
    },
}

/// Builds the navigation graph from declared routes.
///
/// The node with id `"root"` becomes the root when declared; otherwise an
/// edgeless root is synthesized. The adjacency is a function: declaring two
/// different destinations for the same `(from, action)` pair is an error,
/// while exact duplicate declarations collapse silently.
pub fn build_graph(routes: &[Route]) -> Result<NavGraph, BuildError> {
    let root = Node::root();
    let mut nodes = HashSet::new();
    let mut transitions = HashSet::new();
    let mut adjacency: HashMap<Node, Vec<(Action, Node)>> = HashMap::new();
    nodes.insert(root.clone());

    for (index, route) in routes.iter().enumerate() {
        if route.from.is_empty() {
            return Err(BuildError::EmptyNodeId {
                index,
                field: "from",
            });
        }
        if route.to.is_empty() {
            return Err(BuildError::EmptyNodeId { index, field: "to" });
        }

        let from = Node::from_id(&route.from);
        let to = Node::from_id(&route.to);
        nodes.insert(from.clone());
        nodes.insert(to.clone());
        transitions.insert(Transition {
            from: from.clone(),
            to: to.clone(),
        });

        let edges = adjacency.entry(from).or_default();
        let declared = edges
            .iter()
            .find(|(action, _)| *action == route.action)
            .map(|(_, existing)| existing.clone());
        match declared {
            Some(existing) if existing == to => {}
            Some(existing) => {
                return Err(BuildError::ConflictingRoute {
                    from: route.from.clone(),
                    action: route.action.to_string(),
                    first: existing.id().to_string(),
                    second: route.to.clone(),
                });
            }
            None => edges.push((route.action.clone(), to)),
        }
    }

    Ok(NavGraph {
        root,
        nodes,
        transitions,
        adjacency,
    })
}
