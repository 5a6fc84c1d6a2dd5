use std::fmt;

use serde::{Deserialize, Serialize};

/// A navigation failure surfaced by an executor.
///
/// The category is what severity triage runs on: fatal failures abort the
/// session, recoverable ones cost only the walk that hit them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum NavError {
    /// The system under test cannot continue (process death, corrupted state).
    #[error("fatal: {message}")]
    Fatal { message: String },
    /// The system recovered or can recover on its own.
    #[error("recoverable: {message}")]
    Recoverable { message: String },
    /// A failure the integration could not categorize.
    #[error("uncategorized: {message}")]
    Other { message: String },
}

impl NavError {
    pub fn fatal(message: impl Into<String>) -> NavError {
        NavError::Fatal {
            message: message.into(),
        }
    }

    pub fn recoverable(message: impl Into<String>) -> NavError {
        NavError::Recoverable {
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> NavError {
        NavError::Other {
            message: message.into(),
        }
    }

    /// Severity of this failure: fatal is `Critical`, recoverable is
    /// `Medium`, anything else `Low`.
    pub fn severity(&self) -> Severity {
        match self {
            NavError::Fatal { .. } => Severity::Critical,
            NavError::Recoverable { .. } => Severity::Medium,
            NavError::Other { .. } => Severity::Low,
        }
    }
}

/// Coarse ranking of how serious a discovered crash is.
///
/// Ordered `Low < Medium < High < Critical`. `High` is never assigned by
/// [`NavError::severity`]; it is reserved for integrations that triage their
/// own failure categories when building crash reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        write!(f, "{}", label)
    }
}
