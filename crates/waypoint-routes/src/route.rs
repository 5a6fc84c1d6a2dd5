use serde::{Deserialize, Serialize};

use crate::action::Action;

/// One declared routing edge: `from` reaches `to` via `action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub from: String,
    pub to: String,
    pub action: Action,
}

impl Route {
    pub fn new(from: impl Into<String>, to: impl Into<String>, action: Action) -> Route {
        Route {
            from: from.into(),
            to: to.into(),
            action,
        }
    }
}
