//! Randomized, reproducible walks over a declared navigation graph.

pub mod executor;
pub mod rng;
pub mod session;

mod walk;

pub use executor::{ActionExecutor, ActionOutcome, SimulatedExecutor, SimulationConfig};
pub use rng::WalkRng;
pub use session::{run_session, run_session_parallel, FuzzConfig};
