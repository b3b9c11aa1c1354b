//! The synchronous benchmark loop.

use std::{cell::Cell, time::Instant};

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;

use crate::{
    algorithms::{GraphAlgorithm, Requirements, SettingValue},
    benchmark::{Complexity, SampleSeries},
    graph::{Graph, StorageKind, VertexId, Weight},
    utils::StopFlag,
};

/// Benchmark parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkConfig {
    /// Number of grow-and-measure iterations (default: 1000)
    pub iterations: usize,
    /// Function mapping an iteration to its x value (default: `O(V+E)`)
    pub complexity: Complexity,
    /// Seed for the graph generator; `None` draws one from the OS (default: `None`)
    pub seed: Option<u64>,
    /// Encoding of the working graph (default: adjacency list)
    pub storage: StorageKind,
    /// Directedness for algorithms that accept both (default: `false`)
    pub directed: bool,
    /// Vertices in the working graph before the first iteration (default: 1)
    pub initial_vertices: usize,
    /// Vertices added per iteration (default: 1)
    pub vertices_per_iteration: usize,
    /// Iteration `i` adds `i * factor` random edges (default: 1)
    pub edges_per_iteration_factor: usize,
    /// Random edge weights are drawn from `1..=max_weight` (default: 10)
    pub max_weight: Weight,
    /// Start vertex for algorithms that take one (default: 0)
    pub start: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            iterations: 1000,
            complexity: Complexity::default(),
            seed: None,
            storage: StorageKind::AdjacencyList,
            directed: false,
            initial_vertices: 1,
            vertices_per_iteration: 1,
            edges_per_iteration_factor: 1,
            max_weight: 10,
            start: 0,
        }
    }
}

/// A monotonic counter used to measure one `execute` call.
///
/// Only differences between two readings are meaningful; the unit is whatever the
/// source counts in.
pub trait TimeSource: Send {
    /// Returns the current counter value.
    fn now(&self) -> u64;
}

/// [`Instant`]-based clock counting nanoseconds since construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Creates a clock whose counter starts at zero now.
    #[must_use]
    pub fn new() -> Self {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Deterministic clock advancing by a fixed step on every reading.
#[derive(Debug, Clone)]
pub struct SteppingClock {
    next: Cell<u64>,
    step: u64,
}

impl SteppingClock {
    /// Creates a clock where each measured interval lasts `step` units.
    #[must_use]
    pub fn new(step: u64) -> Self {
        SteppingClock {
            next: Cell::new(0),
            step,
        }
    }
}

impl TimeSource for SteppingClock {
    fn now(&self) -> u64 {
        let now = self.next.get();
        self.next.set(now + self.step);
        now
    }
}

/// What a benchmark run produced.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    /// `(x, cost)` samples, described by the algorithm's settings
    #[serde(skip)]
    pub series: SampleSeries,
    /// Human-readable description of the measured algorithm
    pub info: String,
    /// Complexity function the x values were computed with
    pub complexity: Complexity,
    /// Iterations that produced a sample
    pub measured: usize,
    /// Iterations skipped because the grown graph failed the algorithm's check
    pub skipped: usize,
    /// Whether the run ended on a stop request
    pub aborted: bool,
    /// Vertices in the working graph at the end
    pub vertices: usize,
    /// Edges in the working graph at the end
    pub edges: usize,
}

/// Grows a working graph and times `execute` on it once per iteration.
///
/// # Examples
///
/// ```rust
/// use graphlab::algorithms::Bfs;
/// use graphlab::benchmark::{BenchmarkConfig, BenchmarkRunner};
/// use graphlab::utils::StopFlag;
///
/// let config = BenchmarkConfig { iterations: 20, seed: Some(1), ..BenchmarkConfig::default() };
/// let report = BenchmarkRunner::new(config).run(&mut Bfs::new(), &StopFlag::new());
///
/// assert_eq!(report.series.len(), 20);
/// assert_eq!(report.vertices, 21);
/// ```
#[derive(Debug)]
pub struct BenchmarkRunner<C: TimeSource = MonotonicClock> {
    config: BenchmarkConfig,
    clock: C,
}

impl BenchmarkRunner<MonotonicClock> {
    /// Creates a runner measuring wall-clock nanoseconds.
    #[must_use]
    pub fn new(config: BenchmarkConfig) -> Self {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<C: TimeSource> BenchmarkRunner<C> {
    /// Creates a runner measuring with `clock`.
    #[must_use]
    pub fn with_clock(config: BenchmarkConfig, clock: C) -> Self {
        BenchmarkRunner { config, clock }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Runs the configured iterations against `algorithm`.
    ///
    /// The working graph accumulates across iterations and is shaped after the
    /// algorithm's [`Requirements`]: directedness is forced where the algorithm needs
    /// it, edges point from lower to higher vertices when it needs a DAG, and growth
    /// stops at its vertex limit. `stop` is polled before every iteration and again
    /// after every timed execution; a stop request ends the run with the samples
    /// collected so far and discards the iteration in flight.
    pub fn run(&self, algorithm: &mut dyn GraphAlgorithm, stop: &StopFlag) -> BenchmarkReport {
        let config = &self.config;
        let requirements = algorithm.requirements();
        let directed = requirements.directed.unwrap_or(config.directed);
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        if algorithm.settings().iter().any(|spec| spec.name == "start") {
            let start = SettingValue::Vertex(VertexId::new(config.start));
            if let Err(error) = algorithm.set_setting("start", start) {
                log::warn!("Could not set the start vertex: {error}");
            }
        }

        let info = algorithm.describe();
        let mut series = SampleSeries::new(info.clone());
        let mut graph = Graph::with_vertices(config.initial_vertices, directed, config.storage);
        let mut skipped = 0;
        let mut aborted = false;

        log::info!(
            "Benchmarking {info} over {} iterations, x = {}",
            config.iterations,
            config.complexity
        );

        for i in 1..=config.iterations {
            if stop.is_requested() {
                log::info!("Benchmark of {info} stopped after {} samples", series.len());
                aborted = true;
                break;
            }

            if !self.grow(&mut graph, i, requirements, &mut rng) {
                log::info!(
                    "{info} accepts at most {} vertices, stopping after iteration {}",
                    requirements.max_vertices.unwrap_or_default(),
                    i - 1
                );
                break;
            }

            if let Err(reason) = algorithm.check(&graph) {
                if skipped == 0 {
                    log::warn!("Skipping iteration {i} of {info}: {reason}");
                }
                skipped += 1;
                continue;
            }

            algorithm.clear();
            let before = self.clock.now();
            algorithm.execute(&graph);
            let after = self.clock.now();
            algorithm.clear();

            if stop.is_requested() {
                log::info!(
                    "Benchmark of {info} stopped during iteration {i} after {} samples",
                    series.len()
                );
                aborted = true;
                break;
            }

            #[allow(clippy::cast_precision_loss)]
            let cost = after.saturating_sub(before) as f64;
            let x = config
                .complexity
                .eval(i, graph.vertex_count(), graph.edge_count());
            series.push(x, cost);
        }

        if skipped > 0 {
            log::warn!("{skipped} iterations of {info} were skipped");
        }
        log::info!(
            "Benchmark of {info} finished with {} samples on {} vertices and {} edges",
            series.len(),
            graph.vertex_count(),
            graph.edge_count()
        );

        BenchmarkReport {
            measured: series.len(),
            series,
            info,
            complexity: config.complexity,
            skipped,
            aborted,
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
        }
    }

    /// Adds the vertices and edges of iteration `i`.
    ///
    /// Returns `false` without touching the graph if that would exceed the
    /// algorithm's vertex limit.
    fn grow(
        &self,
        graph: &mut Graph,
        i: usize,
        requirements: Requirements,
        rng: &mut StdRng,
    ) -> bool {
        let config = &self.config;
        let target = graph.vertex_count() + config.vertices_per_iteration;
        if requirements.max_vertices.is_some_and(|limit| target > limit) {
            return false;
        }
        while graph.vertex_count() < target {
            graph.add_node();
        }

        if graph.vertex_count() < 2 {
            return true;
        }
        let max_weight = config.max_weight.max(1);
        for _ in 0..i * config.edges_per_iteration_factor {
            let (Some(a), Some(b)) = (graph.random_vertex(rng), graph.random_vertex(rng)) else {
                break;
            };
            if a == b {
                continue;
            }
            let (from, to) = if requirements.acyclic {
                (a.min(b), a.max(b))
            } else {
                (a, b)
            };
            graph.add_edge(from, to, rng.gen_range(1..=max_weight));
        }
        true
    }
}
