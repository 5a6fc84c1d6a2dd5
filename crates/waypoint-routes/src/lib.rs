pub mod action;
pub mod node;
pub mod parse;
pub mod route;

pub use action::{Action, SwipeDirection};
pub use node::{Node, NodeKind};
pub use parse::{parse_routes, ParseError};
pub use route::Route;
