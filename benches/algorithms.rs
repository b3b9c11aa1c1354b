//! Benchmarks for the algorithm catalog.
//!
//! Every algorithm runs on a seeded random graph of the shape it requires:
//! - Traversals, shortest paths and MST on sparse undirected graphs
//! - Topological sorts on random DAGs (edges from lower to higher ids)
//! - Tarjan on sparse directed graphs
//! - TSP on small complete graphs
//! - Euler on a long cycle

extern crate graphlab;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use graphlab::{
    algorithms::{
        BellmanFord, Bfs, Dfs, Dijkstra, Euler, FloydWarshall, GraphAlgorithm, Prim,
        QueueStrategy, SortStrategy, Tarjan, TopologicalSort, Tsp, TspMemo,
    },
    graph::{Graph, StorageKind, VertexId},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

const SEED: u64 = 0x6772_6170_686c_6162;

fn sparse(vertices: usize, directed: bool, kind: StorageKind) -> Graph {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut graph = Graph::with_vertices(vertices, directed, kind);
    let probability = (4.0 / vertices as f64).min(1.0);
    graph.generate_random_weighted_edges(probability, 1..=20, &mut rng);
    graph
}

fn dag(vertices: usize) -> Graph {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut graph = Graph::with_vertices(vertices, true, StorageKind::AdjacencyList);
    for _ in 0..vertices * 3 {
        let a = rng.gen_range(0..vertices);
        let b = rng.gen_range(0..vertices);
        if a != b {
            graph.add_edge(VertexId::new(a.min(b)), VertexId::new(a.max(b)), 1);
        }
    }
    graph
}

fn cycle(vertices: usize) -> Graph {
    Graph::from_edges(
        false,
        StorageKind::AdjacencyList,
        (0..vertices).map(|i| (i, (i + 1) % vertices, 1)),
    )
}

/// Times `execute` alone; the check runs once up front.
fn bench_execute(c: &mut Criterion, name: &str, algorithm: &mut dyn GraphAlgorithm, graph: &Graph) {
    algorithm.check(graph).unwrap();
    c.bench_function(name, |b| {
        b.iter(|| {
            algorithm.clear();
            algorithm.execute(black_box(graph));
        });
    });
}

fn bench_traversals(c: &mut Criterion) {
    let graph = sparse(2_000, false, StorageKind::AdjacencyList);
    bench_execute(c, "bfs_2000", &mut Bfs::new(), &graph);
    bench_execute(c, "dfs_2000", &mut Dfs::new(), &graph);
}

/// Lazy and eager queues on both encodings and several sizes.
fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra");
    for vertices in [250, 1_000] {
        for kind in [StorageKind::AdjacencyList, StorageKind::AdjacencyMatrix] {
            let graph = sparse(vertices, false, kind);
            for strategy in [QueueStrategy::Lazy, QueueStrategy::Eager] {
                let mut dijkstra = Dijkstra::new(strategy);
                dijkstra.check(&graph).unwrap();
                group.bench_with_input(
                    BenchmarkId::new(format!("{strategy:?}/{kind}"), vertices),
                    &graph,
                    |b, graph| {
                        b.iter(|| {
                            dijkstra.clear();
                            dijkstra.execute(black_box(graph));
                        });
                    },
                );
            }
        }
    }
    group.finish();
}

fn bench_shortest_paths(c: &mut Criterion) {
    let graph = sparse(300, true, StorageKind::AdjacencyList);
    bench_execute(c, "bellman_ford_300", &mut BellmanFord::new(), &graph);

    let graph = sparse(120, true, StorageKind::AdjacencyMatrix);
    bench_execute(c, "floyd_warshall_120", &mut FloydWarshall::new(), &graph);
}

fn bench_orderings(c: &mut Criterion) {
    let graph = dag(2_000);
    bench_execute(
        c,
        "topological_kahn_2000",
        &mut TopologicalSort::new(SortStrategy::Kahn),
        &graph,
    );
    bench_execute(
        c,
        "topological_dfs_2000",
        &mut TopologicalSort::new(SortStrategy::Dfs),
        &graph,
    );

    let graph = sparse(2_000, true, StorageKind::AdjacencyList);
    bench_execute(c, "tarjan_2000", &mut Tarjan::new(), &graph);
}

fn bench_tsp(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut graph = Graph::with_vertices(10, false, StorageKind::AdjacencyMatrix);
    graph.generate_random_weighted_edges(1.0, 1..=50, &mut rng);

    bench_execute(c, "tsp_bitmask_10", &mut Tsp::new(TspMemo::Bitmask), &graph);
    bench_execute(c, "tsp_hashed_10", &mut Tsp::new(TspMemo::Hashed), &graph);
}

fn bench_euler(c: &mut Criterion) {
    bench_execute(c, "euler_cycle_5000", &mut Euler::new(), &cycle(5_000));
}

fn bench_prim(c: &mut Criterion) {
    let graph = sparse(2_000, false, StorageKind::AdjacencyList);
    bench_execute(
        c,
        "prim_lazy_2000",
        &mut Prim::new(QueueStrategy::Lazy),
        &graph,
    );
    bench_execute(
        c,
        "prim_eager_2000",
        &mut Prim::new(QueueStrategy::Eager),
        &graph,
    );
}

criterion_group!(
    benches,
    bench_traversals,
    bench_dijkstra,
    bench_shortest_paths,
    bench_orderings,
    bench_tsp,
    bench_euler,
    bench_prim
);
criterion_main!(benches);
