pub mod coverage;
pub mod record;
pub mod report;
pub mod severity;

pub use coverage::CoverageStats;
pub use record::{CrashReport, InvalidRoute, WalkResult};
pub use report::{FuzzingReport, StopReason};
pub use severity::{NavError, Severity};
