use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use waypoint_graph::NavGraph;

use crate::coverage::CoverageStats;
use crate::record::{CrashReport, InvalidRoute, WalkResult};
use crate::severity::Severity;

/// Why a session stopped issuing walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The configured iteration budget ran out.
    Completed,
    /// A critical crash aborted the session early.
    CriticalCrash,
}

/// The terminal artifact of a fuzzing session.
///
/// A pure reduction over the walk results plus the graph's static totals;
/// `timestamp` and `duration` are the only fields a fixed seed does not
/// reproduce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzingReport {
    /// When the session finished.
    pub timestamp: DateTime<Utc>,
    pub duration: Duration,
    /// The seed the session ran with, always present so any failure can be
    /// replayed, whether the caller supplied it or it was generated.
    pub seed: u64,
    pub walks_executed: u64,
    pub stop_reason: StopReason,
    pub walks: Vec<WalkResult>,
    /// Every crash across all walks, flattened.
    pub crashes: Vec<CrashReport>,
    /// Every rejected transition across all walks, flattened.
    pub invalid_routes: Vec<InvalidRoute>,
    pub coverage: CoverageStats,
}

impl FuzzingReport {
    /// Reduces a session's walk results into the final report.
    pub fn from_walks(
        graph: &NavGraph,
        seed: u64,
        duration: Duration,
        stop_reason: StopReason,
        walks: Vec<WalkResult>,
    ) -> FuzzingReport {
        let crashes: Vec<CrashReport> = walks.iter().filter_map(|w| w.crash.clone()).collect();
        let invalid_routes: Vec<InvalidRoute> = walks
            .iter()
            .flat_map(|w| w.invalid_routes.iter().cloned())
            .collect();
        let coverage = CoverageStats::collect(graph, &walks);

        FuzzingReport {
            timestamp: Utc::now(),
            duration,
            seed,
            walks_executed: walks.len() as u64,
            stop_reason,
            walks,
            crashes,
            invalid_routes,
            coverage,
        }
    }

    /// Crash counts bucketed by severity. Buckets with no crashes are absent.
    pub fn crashes_by_severity(&self) -> BTreeMap<Severity, usize> {
        let mut counts = BTreeMap::new();
        for crash in &self.crashes {
            *counts.entry(crash.severity).or_insert(0) += 1;
        }
        counts
    }

    /// The human-readable session digest.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FuzzingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stopped = match self.stop_reason {
            StopReason::Completed => "completed",
            StopReason::CriticalCrash => "stopped on critical crash",
        };
        writeln!(f, "navigation fuzzing report")?;
        writeln!(f, "  finished:        {}", self.timestamp.to_rfc3339())?;
        writeln!(f, "  duration:        {:.3}s", self.duration.as_secs_f64())?;
        writeln!(f, "  seed:            {}", self.seed)?;
        writeln!(f, "  walks:           {} ({})", self.walks_executed, stopped)?;
        writeln!(f, "  crashes:         {}", self.crashes.len())?;
        let counts = self.crashes_by_severity();
        for severity in [
            Severity::Critical,
            Severity::High,
            Severity::Medium,
            Severity::Low,
        ] {
            if let Some(count) = counts.get(&severity) {
                writeln!(f, "    {}: {}", severity, count)?;
            }
        }
        writeln!(f, "  invalid routes:  {}", self.invalid_routes.len())?;
        writeln!(
            f,
            "  node coverage:   {}/{} ({:.1}%)",
            self.coverage.nodes_visited,
            self.coverage.total_nodes,
            self.coverage.percentage * 100.0
        )?;
        write!(
            f,
            "  transitions:     {}/{}",
            self.coverage.transitions_covered, self.coverage.total_transitions
        )
    }
}
