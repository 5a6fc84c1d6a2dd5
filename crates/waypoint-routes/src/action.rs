use std::fmt;

use serde::{Deserialize, Serialize};

/// A user- or system-initiated input that may cause a transition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Tap { label: String },
    Swipe { direction: SwipeDirection },
    Back,
    Dismiss,
    DeepLink { target: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    pub fn tap(label: impl Into<String>) -> Action {
        Action::Tap {
            label: label.into(),
        }
    }

    pub fn swipe(direction: SwipeDirection) -> Action {
        Action::Swipe { direction }
    }

    pub fn deep_link(target: impl Into<String>) -> Action {
        Action::DeepLink {
            target: target.into(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tap { label } => write!(f, "tap({})", label),
            Action::Swipe { direction } => write!(f, "swipe({})", direction),
            Action::Back => write!(f, "back"),
            Action::Dismiss => write!(f, "dismiss"),
            Action::DeepLink { target } => write!(f, "deep_link({})", target),
        }
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SwipeDirection::Up => "up",
            SwipeDirection::Down => "down",
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
        };
        write!(f, "{}", label)
    }
}
