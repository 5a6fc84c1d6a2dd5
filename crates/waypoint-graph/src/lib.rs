pub mod builder;
pub mod graph;

pub use builder::{build_graph, BuildError};
pub use graph::{NavGraph, Transition};
