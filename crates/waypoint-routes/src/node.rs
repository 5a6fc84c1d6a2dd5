use std::fmt;

use serde::{Deserialize, Serialize};

/// One navigable application state.
///
/// Equality and hashing cover the identifier and the derived kind, so two
/// nodes built from the same id are interchangeable everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    id: String,
    kind: NodeKind,
}

/// The structural role of a node, derived from its id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Root,
    Tab { name: String },
    Screen { name: String },
    Modal { name: String },
    Alert { name: String },
}

impl Node {
    /// Builds a node from a route id.
    ///
    /// The kind follows the id prefix convention: `root`, `tab:`, `screen:`,
    /// `modal:`, `alert:`. An id with no recognized prefix is a screen named
    /// by the whole id.
    pub fn from_id(id: &str) -> Node {
        let kind = if id == "root" {
            NodeKind::Root
        } else if let Some(name) = id.strip_prefix("tab:") {
            NodeKind::Tab { name: name.to_string() }
        } else if let Some(name) = id.strip_prefix("screen:") {
            NodeKind::Screen { name: name.to_string() }
        } else if let Some(name) = id.strip_prefix("modal:") {
            NodeKind::Modal { name: name.to_string() }
        } else if let Some(name) = id.strip_prefix("alert:") {
            NodeKind::Alert { name: name.to_string() }
        } else {
            NodeKind::Screen { name: id.to_string() }
        };
        Node {
            id: id.to_string(),
            kind,
        }
    }

    /// The distinguished root node.
    pub fn root() -> Node {
        Node {
            id: "root".to_string(),
            kind: NodeKind::Root,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_derivation() {
        assert_eq!(*Node::from_id("root").kind(), NodeKind::Root);
        assert_eq!(
            *Node::from_id("tab:home").kind(),
            NodeKind::Tab {
                name: "home".to_string()
            }
        );
        assert_eq!(
            *Node::from_id("screen:detail").kind(),
            NodeKind::Screen {
                name: "detail".to_string()
            }
        );
        assert_eq!(
            *Node::from_id("modal:compose").kind(),
            NodeKind::Modal {
                name: "compose".to_string()
            }
        );
        assert_eq!(
            *Node::from_id("alert:error").kind(),
            NodeKind::Alert {
                name: "error".to_string()
            }
        );
    }

    #[test]
    fn test_bare_id_is_a_screen() {
        let node = Node::from_id("checkout");
        assert_eq!(
            *node.kind(),
            NodeKind::Screen {
                name: "checkout".to_string()
            }
        );
        assert_eq!(node.id(), "checkout");
    }

    #[test]
    fn test_declared_root_equals_synthesized_root() {
        assert_eq!(Node::from_id("root"), Node::root());
    }

    #[test]
    fn test_display_is_the_id() {
        assert_eq!(Node::from_id("tab:home").to_string(), "tab:home");
    }
}
