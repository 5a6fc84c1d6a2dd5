use std::time::Duration;

use waypoint_fuzzer::{
    run_session, run_session_parallel, ActionExecutor, ActionOutcome, FuzzConfig,
    SimulatedExecutor, SimulationConfig,
};
use waypoint_graph::{build_graph, NavGraph};
use waypoint_report::{NavError, Severity, StopReason};
use waypoint_routes::{parse_routes, Action, Node, Route};

struct AlwaysInvalid;

impl ActionExecutor for AlwaysInvalid {
    fn perform(&mut self, _from: &Node, _action: &Action) -> ActionOutcome {
        ActionOutcome::Invalid("rejected by stub".to_string())
    }
}

struct AlwaysFatal;

impl ActionExecutor for AlwaysFatal {
    fn perform(&mut self, _from: &Node, _action: &Action) -> ActionOutcome {
        ActionOutcome::Crashed(NavError::fatal("stub blew up"))
    }
}

/// A small app: two tabs off the root, a detail screen, a settings modal,
/// and a promo deep link.
fn app_graph() -> NavGraph {
    let routes = parse_routes(
        r#"[
        {"from": "root", "to": "tab:home", "action": {"type": "tap", "label": "home"}},
        {"from": "root", "to": "tab:profile", "action": {"type": "tap", "label": "profile"}},
        {"from": "tab:home", "to": "screen:detail", "action": {"type": "swipe", "direction": "left"}},
        {"from": "screen:detail", "to": "tab:home", "action": {"type": "back"}},
        {"from": "tab:profile", "to": "modal:settings", "action": {"type": "tap", "label": "settings"}},
        {"from": "modal:settings", "to": "tab:profile", "action": {"type": "dismiss"}},
        {"from": "root", "to": "screen:promo", "action": {"type": "deep_link", "target": "promo"}}
    ]"#,
    )
    .unwrap();
    build_graph(&routes).unwrap()
}

/// root -> A -> B, nothing declared from B.
fn linear_graph() -> NavGraph {
    build_graph(&[
        Route::new("root", "screen:a", Action::tap("go")),
        Route::new("screen:a", "screen:b", Action::tap("next")),
    ])
    .unwrap()
}

/// Two actions from the root, so the very first pick is seed-sensitive.
fn fork_graph() -> NavGraph {
    build_graph(&[
        Route::new("root", "screen:left", Action::tap("left")),
        Route::new("root", "screen:right", Action::tap("right")),
    ])
    .unwrap()
}

fn quiet() -> SimulationConfig {
    SimulationConfig {
        crash_probability: 0.0,
        max_latency: Duration::ZERO,
    }
}

fn config(max_depth: usize, max_iterations: u64, seed: u64) -> FuzzConfig {
    FuzzConfig {
        max_depth,
        max_iterations,
        seed: Some(seed),
        backtrack_probability: 0.5,
    }
}

#[test]
fn test_same_seed_reproduces_the_report() {
    let graph = app_graph();
    let cfg = config(6, 25, 42);

    let run = || {
        let mut executor = SimulatedExecutor::with_config(&graph, 42, quiet());
        run_session(&graph, &mut executor, &cfg)
    };

    let first = run();
    let second = run();

    assert_eq!(first.seed, 42);
    assert_eq!(first.walks, second.walks);
    assert_eq!(first.crashes, second.crashes);
    assert_eq!(first.invalid_routes, second.invalid_routes);
    assert_eq!(first.coverage, second.coverage);
    assert_eq!(first.stop_reason, second.stop_reason);
}

#[test]
fn test_generated_seed_is_surfaced_and_replayable() {
    let graph = app_graph();
    let unseeded = FuzzConfig {
        max_depth: 5,
        max_iterations: 10,
        seed: None,
        backtrack_probability: 0.5,
    };

    let mut executor = SimulatedExecutor::with_config(&graph, 0, quiet());
    let first = run_session(&graph, &mut executor, &unseeded);

    let replay_cfg = FuzzConfig {
        seed: Some(first.seed),
        ..unseeded
    };
    let mut executor = SimulatedExecutor::with_config(&graph, 0, quiet());
    let replay = run_session(&graph, &mut executor, &replay_cfg);

    assert_eq!(first.walks, replay.walks);
    assert_eq!(first.coverage, replay.coverage);
}

#[test]
fn test_coverage_stays_in_bounds() {
    let graph = app_graph();
    let cfg = config(8, 50, 7);
    let mut executor = SimulatedExecutor::with_config(&graph, 7, quiet());

    let report = run_session(&graph, &mut executor, &cfg);

    assert!(report.coverage.nodes_visited <= report.coverage.total_nodes);
    assert!(report.coverage.percentage >= 0.0);
    assert!(report.coverage.percentage <= 1.0);
    assert_eq!(report.coverage.total_nodes, graph.node_count());
}

#[test]
fn test_dead_end_root_yields_single_node_walks() {
    // The root is synthesized with no outgoing edges.
    let graph = build_graph(&[Route::new("screen:a", "screen:b", Action::tap("go"))]).unwrap();
    let cfg = config(10, 20, 3);
    let mut executor = SimulatedExecutor::with_config(&graph, 3, quiet());

    let report = run_session(&graph, &mut executor, &cfg);

    assert_eq!(report.walks_executed, 20);
    assert!(report
        .walks
        .iter()
        .all(|walk| walk.path == vec![Node::root()]));
    assert!(report.crashes.is_empty());
    assert!(report.invalid_routes.is_empty());
    assert_eq!(report.stop_reason, StopReason::Completed);
    assert_eq!(report.coverage.nodes_visited, 1);
}

#[test]
fn test_invalid_only_executor_never_advances() {
    let graph = linear_graph();
    let cfg = config(4, 3, 9);
    let mut executor = AlwaysInvalid;

    let report = run_session(&graph, &mut executor, &cfg);

    assert_eq!(report.walks_executed, 3);
    for walk in &report.walks {
        assert_eq!(walk.path, vec![Node::root()]);
        assert_eq!(walk.invalid_routes.len(), 4);
        assert!(walk.crash.is_none());
    }
    // One record per attempted step, across every walk.
    assert_eq!(report.invalid_routes.len(), 12);
    assert_eq!(report.stop_reason, StopReason::Completed);
}

#[test]
fn test_critical_crash_stops_the_session() {
    let graph = linear_graph();
    let cfg = config(10, 100, 1);
    let mut executor = AlwaysFatal;

    let report = run_session(&graph, &mut executor, &cfg);

    assert_eq!(report.walks_executed, 1);
    assert_eq!(report.walks.len(), 1);
    assert_eq!(report.crashes.len(), 1);
    assert_eq!(report.crashes[0].severity, Severity::Critical);
    assert_eq!(report.stop_reason, StopReason::CriticalCrash);
}

#[test]
fn test_linear_scenario_is_reproducible() {
    let graph = linear_graph();
    let cfg = FuzzConfig {
        max_depth: 5,
        max_iterations: 1,
        seed: Some(42),
        backtrack_probability: 0.5,
    };

    let run = || {
        let mut executor = SimulatedExecutor::with_config(&graph, 42, quiet());
        run_session(&graph, &mut executor, &cfg)
    };

    let first = run();
    let second = run();

    assert_eq!(first.walks.len(), 1);
    let path = &first.walks[0].path;
    assert!(path.len() <= 3, "dead end at B bounds the path");
    assert_eq!(path[0], Node::root());
    assert!(path.iter().all(|node| graph.nodes().contains(node)));
    assert!(first.crashes.is_empty());
    assert!(first.invalid_routes.is_empty());
    assert_eq!(first.walks, second.walks);
}

#[test]
fn test_adjacent_seeds_pick_differently() {
    let graph = fork_graph();
    let base = FuzzConfig {
        max_depth: 1,
        max_iterations: 1,
        seed: None,
        backtrack_probability: 0.0,
    };

    let run = |seed: u64| {
        let mut executor = SimulatedExecutor::with_config(&graph, seed, quiet());
        let cfg = FuzzConfig {
            seed: Some(seed),
            ..base.clone()
        };
        run_session(&graph, &mut executor, &cfg)
    };

    let with_42 = run(42);
    let with_43 = run(43);

    let path_42: Vec<&str> = with_42.walks[0].path.iter().map(|n| n.id()).collect();
    let path_43: Vec<&str> = with_43.walks[0].path.iter().map(|n| n.id()).collect();
    assert_eq!(path_42, vec!["root", "screen:right"]);
    assert_eq!(path_43, vec!["root", "screen:left"]);
}

#[test]
fn test_parallel_session_matches_sequential() {
    let graph = app_graph();
    let cfg = config(6, 16, 11);

    let mut executor = SimulatedExecutor::with_config(&graph, 11, quiet());
    let sequential = run_session(&graph, &mut executor, &cfg);

    let parallel = run_session_parallel(
        &graph,
        |iteration| SimulatedExecutor::with_config(&graph, iteration, quiet()),
        &cfg,
    );

    assert_eq!(sequential.walks, parallel.walks);
    assert_eq!(sequential.coverage, parallel.coverage);
    assert_eq!(sequential.stop_reason, parallel.stop_reason);
}

#[test]
fn test_parallel_session_truncates_after_critical() {
    let graph = linear_graph();
    let cfg = config(5, 64, 2);

    let report = run_session_parallel(&graph, |_| AlwaysFatal, &cfg);

    assert_eq!(report.walks_executed, 1);
    assert_eq!(report.walks[0].iteration, 0);
    assert_eq!(report.stop_reason, StopReason::CriticalCrash);
}

#[test]
fn test_simulated_crashes_are_recorded() {
    let graph = linear_graph();
    let cfg = config(5, 5, 9);
    let mut executor = SimulatedExecutor::with_config(
        &graph,
        9,
        SimulationConfig {
            crash_probability: 1.0,
            max_latency: Duration::ZERO,
        },
    );

    let report = run_session(&graph, &mut executor, &cfg);

    // Every walk crashes on its first step.
    assert_eq!(report.crashes.len(), report.walks.len());
    for (walk, crash) in report.walks.iter().zip(&report.crashes) {
        assert_eq!(walk.crash.as_ref(), Some(crash));
        assert_eq!(crash.path, vec![Node::root()]);
    }
    if report.stop_reason == StopReason::CriticalCrash {
        assert_eq!(
            report.crashes.last().map(|c| c.severity),
            Some(Severity::Critical)
        );
    }
}

#[test]
fn test_config_defaults_and_json() {
    let defaults = FuzzConfig::default();
    assert_eq!(defaults.max_depth, 10);
    assert_eq!(defaults.max_iterations, 1000);
    assert_eq!(defaults.seed, None);
    assert!((defaults.backtrack_probability - 0.5).abs() < 1e-9);

    let cfg: FuzzConfig = serde_json::from_str(
        r#"{"max_depth": 3, "max_iterations": 7, "seed": 5, "backtrack_probability": 0.25}"#,
    )
    .unwrap();
    assert_eq!(cfg.max_depth, 3);
    assert_eq!(cfg.max_iterations, 7);
    assert_eq!(cfg.seed, Some(5));
}

// ── Integration test: full fuzzing session over the app graph ───────────

/// Parse real route JSON, build the graph, run a full simulated session,
/// and check the report end to end: counts, coverage, severity buckets,
/// and replayability from the recorded seed.
#[test]
fn test_full_session_end_to_end() {
    // 1. Routes in from JSON.
    let graph = app_graph();

    // 2. A session with simulated flakiness.
    let cfg = FuzzConfig {
        max_depth: 8,
        max_iterations: 200,
        seed: Some(1234),
        backtrack_probability: 0.5,
    };
    let sim = SimulationConfig {
        crash_probability: 0.05,
        max_latency: Duration::ZERO,
    };
    let mut executor = SimulatedExecutor::with_config(&graph, 1234, sim.clone());
    let report = run_session(&graph, &mut executor, &cfg);

    // 3. The report accounts for every walk it ran.
    assert!(report.walks_executed >= 1);
    assert!(report.walks_executed <= 200);
    assert_eq!(report.walks.len() as u64, report.walks_executed);
    match report.stop_reason {
        StopReason::Completed => assert_eq!(report.walks_executed, 200),
        StopReason::CriticalCrash => {
            let last = report.walks.last().and_then(|w| w.crash.as_ref());
            assert_eq!(last.map(|c| c.severity), Some(Severity::Critical));
        }
    }

    // 4. Flattened records agree with the per-walk ones.
    let walk_crashes = report.walks.iter().filter(|w| w.crash.is_some()).count();
    assert_eq!(report.crashes.len(), walk_crashes);
    let walk_invalids: usize = report.walks.iter().map(|w| w.invalid_routes.len()).sum();
    assert_eq!(report.invalid_routes.len(), walk_invalids);

    // 5. Severity buckets only ever hold what the simulation can produce.
    for crash in &report.crashes {
        assert_ne!(crash.severity, Severity::High);
    }

    // 6. Coverage is sane and the summary renders it.
    assert!(report.coverage.nodes_visited >= 1);
    assert!(report.coverage.percentage <= 1.0);
    let summary = report.summary();
    assert!(summary.contains("seed:            1234"));
    assert!(summary.contains("node coverage:"));

    // 7. The recorded seed replays to the same walks.
    let mut executor = SimulatedExecutor::with_config(&graph, 1234, sim);
    let replay = run_session(&graph, &mut executor, &cfg);
    assert_eq!(report.walks, replay.walks);
}
