//! Whole workflows through the public API: configure an algorithm, run it, replay it,
//! benchmark it, and persist what comes out.

use std::time::{Duration, Instant};

use graphlab::{
    algorithms::{
        AlgorithmKind, AlgorithmRegistry, BellmanFord, GraphAlgorithm, Outcome, RevealUnit,
        SettingValue, Tarjan, Tsp, TspMemo, BITMASK_LIMIT,
    },
    benchmark::{BenchmarkConfig, BenchmarkWorker, Complexity, SampleSeries, SpikeFilter},
    graph::{Graph, StorageKind, VertexId},
    persistence::{Layout, Position},
    visualizer::{ReplayConfig, Visualizer},
    Error, Precondition,
};

fn v(index: usize) -> VertexId {
    VertexId::new(index)
}

#[test]
fn test_configure_run_and_replay() {
    let graph = Graph::from_edges(
        false,
        StorageKind::AdjacencyMatrix,
        [(0, 1, 7), (0, 2, 9), (0, 5, 14), (1, 2, 10), (1, 3, 15), (2, 3, 11), (2, 5, 2), (3, 4, 6), (4, 5, 9)],
    );

    let registry = AlgorithmRegistry::with_defaults();
    let mut dijkstra = registry.create(AlgorithmKind::DijkstraEager).unwrap();
    dijkstra
        .set_setting("end", SettingValue::OptionalVertex(Some(v(4))))
        .unwrap();
    assert_eq!(dijkstra.describe(), "Dijkstra (eager) [start=0, end=4]");
    dijkstra.run(&graph).unwrap();

    let Outcome::ShortestPaths { distances, path, negative_cycle } = dijkstra.outcome() else {
        panic!("unexpected outcome");
    };
    assert!(!negative_cycle);
    assert_eq!(distances[4], Some(20));
    assert_eq!(path, Some(vec![v(0), v(2), v(5), v(4)]));

    let units = dijkstra.reveal_units();
    assert_eq!(units, RevealUnit::along(&[v(0), v(2), v(5), v(4)]));

    let start = Instant::now();
    let step = Duration::from_millis(100);
    let mut visualizer = Visualizer::new(ReplayConfig { interval: step });
    visualizer.start(units.clone(), start);

    assert_eq!(visualizer.poll(start + step), units[..1].to_vec());

    // Paused time does not count towards the next reveal
    visualizer.set_pause(true, start + step);
    assert!(visualizer.poll(start + step * 10).is_empty());
    visualizer.set_pause(false, start + step * 10);
    assert!(visualizer.poll(start + step * 10).is_empty());
    assert_eq!(visualizer.poll(start + step * 12), units[1..3].to_vec());

    assert!(visualizer.state().is_edge_visited(v(5), v(2)));
    assert!(!visualizer.state().is_vertex_visited(v(1)));

    assert_eq!(visualizer.poll(start + step * 13), units[3..].to_vec());
    assert!(visualizer.poll(start + step * 14).is_empty());
    assert!(!visualizer.is_running());
    assert_eq!(visualizer.replay().progress(), 1.0);

    visualizer.reset();
    assert_eq!(visualizer.replay().cursor(), 0);
    assert!(visualizer.replay().units().is_empty());
}

#[test]
fn test_components_are_revealed_whole() {
    let graph = Graph::from_edges(
        true,
        StorageKind::AdjacencyList,
        [(0, 1, 1), (1, 0, 1), (1, 2, 1), (2, 3, 1), (3, 2, 1)],
    );
    let mut tarjan = Tarjan::new();
    tarjan.run(&graph).unwrap();

    let units = tarjan.reveal_units();
    assert_eq!(units.len(), 2);
    assert!(units
        .iter()
        .all(|unit| matches!(unit, RevealUnit::Batch { vertices, .. } if vertices.len() == 2)));
}

#[test]
fn test_negative_cycles_are_flagged() {
    let graph = Graph::from_edges(
        true,
        StorageKind::AdjacencyList,
        [(0, 1, 1), (1, 2, -2), (2, 1, 1), (2, 3, 4)],
    );
    let mut bellman_ford = BellmanFord::new().ending_at(v(3));
    bellman_ford.run(&graph).unwrap();

    assert!(bellman_ford.has_negative_cycle());
    assert_eq!(bellman_ford.path_to(v(3)), None);
    assert!(matches!(
        bellman_ford.outcome(),
        Outcome::ShortestPaths { negative_cycle: true, path: None, .. }
    ));
}

#[test]
fn test_oversized_inputs_are_preconditions() {
    let graph = Graph::with_vertices(BITMASK_LIMIT + 1, false, StorageKind::AdjacencyList);
    let mut tsp = Tsp::new(TspMemo::Bitmask);

    let error = tsp.run(&graph).unwrap_err();
    assert!(matches!(
        error,
        Error::Precondition(Precondition::TooManyVertices { count, limit })
            if count == BITMASK_LIMIT + 1 && limit == BITMASK_LIMIT
    ));
    assert_eq!(tsp.outcome(), Outcome::Pending);
    assert!(!error.to_string().is_empty());
}

#[test]
fn test_benchmark_filter_and_persist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tarjan.json");

    let mut worker = BenchmarkWorker::new(BenchmarkConfig {
        iterations: 40,
        complexity: Complexity::VerticesPlusEdges,
        seed: Some(23),
        directed: true,
        ..BenchmarkConfig::default()
    });
    worker.start(Box::new(Tarjan::new())).unwrap();
    let completed = worker.wait().unwrap();

    assert_eq!(completed.algorithm.kind(), AlgorithmKind::Tarjan);
    assert_eq!(completed.report.measured, 40);
    assert_eq!(completed.report.series.info(), "Tarjan's SCC");

    let filtered = SpikeFilter::default().apply(&completed.report.series);
    assert!(filtered.len() >= 2 && filtered.len() <= 40);
    filtered.save(&path).unwrap();

    let loaded = SampleSeries::load(&path).unwrap();
    assert_eq!(loaded, filtered);
    assert_eq!(loaded.points().first(), completed.report.series.points().first());
    assert_eq!(loaded.points().last(), completed.report.series.points().last());
}

#[test]
fn test_layouts_survive_failed_loads() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("layout.json");
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, r#"{"0": {"x": 1.0}}"#).unwrap();

    let mut layout = Layout::new();
    layout.set(v(0), Position { x: 10.0, y: 20.0 });
    layout.set(v(3), Position { x: -5.0, y: 0.5 });
    layout.save(&good).unwrap();

    let text = std::fs::read_to_string(&good).unwrap();
    assert!(text.contains("\"3\""));

    let before = layout.clone();
    if let Ok(loaded) = Layout::load(&bad) {
        layout = loaded;
    }
    assert_eq!(layout, before);
    assert!(matches!(
        Layout::load(&dir.path().join("missing.json")),
        Err(Error::Io(_))
    ));
    assert_eq!(Layout::load(&good).unwrap(), before);
}
