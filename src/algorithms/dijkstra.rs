//! Dijkstra's single-source shortest paths.
//!
//! Two queue disciplines are provided and must agree on every distance:
//!
//! - [`QueueStrategy::Lazy`] pushes a new `(distance, vertex)` entry on every
//!   improvement and discards stale entries when they are popped.
//! - [`QueueStrategy::Eager`] keeps at most one entry per vertex in an
//!   [`IndexedMinHeap`] and lowers its priority in place.
//!
//! [`Dijkstra::queue_operations`] counts pushes, decrease-keys and pops, so the extra
//! work of the lazy discipline is observable.

use std::{cmp::Reverse, collections::BinaryHeap};

use crate::{
    algorithms::{
        require_non_negative, require_start, require_vertex,
        schema::{self, find_setting, SettingSpec, SettingValue},
        AlgorithmKind, GraphAlgorithm, Outcome, RevealUnit, ShortestPathTree,
    },
    graph::{Graph, VertexId, Weight},
    utils::{BitSet, IndexedMinHeap},
    Error, Precondition, Result,
};

const SETTINGS: &[SettingSpec] = &[schema::START, schema::END];

/// Priority queue discipline of [`Dijkstra`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueStrategy {
    /// Binary heap with stale entries
    #[default]
    Lazy,
    /// Indexed heap with decrease-key
    Eager,
}

/// Dijkstra's algorithm over non-negative edge weights.
///
/// # Examples
///
/// ```rust
/// use graphlab::algorithms::{Dijkstra, GraphAlgorithm, QueueStrategy};
/// use graphlab::graph::{Graph, StorageKind, VertexId};
///
/// let graph = Graph::from_edges(false, StorageKind::AdjacencyList, [(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 0, 1)]);
/// let mut dijkstra = Dijkstra::new(QueueStrategy::Eager);
/// dijkstra.run(&graph)?;
///
/// assert_eq!(dijkstra.distances(), &[Some(0), Some(1), Some(2), Some(1)]);
/// # Ok::<(), graphlab::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dijkstra {
    strategy: QueueStrategy,
    start: VertexId,
    end: Option<VertexId>,
    tree: ShortestPathTree,
    /// Vertices in the order they were settled
    settled: Vec<VertexId>,
    queue_operations: usize,
}

impl Dijkstra {
    /// Creates a Dijkstra run from vertex 0 with the given queue discipline.
    #[must_use]
    pub fn new(strategy: QueueStrategy) -> Self {
        Dijkstra {
            strategy,
            ..Self::default()
        }
    }

    /// Sets the start vertex.
    #[must_use]
    pub fn starting_at(mut self, start: VertexId) -> Self {
        self.start = start;
        self
    }

    /// Sets the end vertex whose path is reported.
    #[must_use]
    pub fn ending_at(mut self, end: VertexId) -> Self {
        self.end = Some(end);
        self
    }

    /// Returns the queue discipline.
    #[must_use]
    pub fn strategy(&self) -> QueueStrategy {
        self.strategy
    }

    /// Returns the distances of the last run, indexed by vertex.
    #[must_use]
    pub fn distances(&self) -> &[Option<Weight>] {
        self.tree.distances()
    }

    /// Returns the shortest path tree of the last run.
    #[must_use]
    pub fn tree(&self) -> &ShortestPathTree {
        &self.tree
    }

    /// Returns the shortest path from the start vertex to `target`.
    #[must_use]
    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        self.tree.path_to(target)
    }

    /// Returns the number of priority queue operations performed by the last run.
    #[must_use]
    pub fn queue_operations(&self) -> usize {
        self.queue_operations
    }

    fn run_lazy(&mut self, graph: &Graph, settled: &mut BitSet) {
        let mut queue: BinaryHeap<Reverse<(Weight, VertexId)>> = BinaryHeap::new();
        queue.push(Reverse((0, self.start)));
        self.queue_operations += 1;

        while let Some(Reverse((distance, vertex))) = queue.pop() {
            self.queue_operations += 1;
            if !settled.insert(vertex.index()) {
                // Stale entry
                continue;
            }
            self.settled.push(vertex);

            for (next, weight) in graph.neighbors(vertex) {
                if settled.contains(next.index()) {
                    continue;
                }
                let candidate = distance.saturating_add(weight);
                if self.tree.relax(vertex, next, candidate) {
                    queue.push(Reverse((candidate, next)));
                    self.queue_operations += 1;
                }
            }
        }
    }

    fn run_eager(&mut self, graph: &Graph, settled: &mut BitSet) {
        let mut queue = IndexedMinHeap::with_capacity(graph.vertex_count());
        queue.push_or_decrease(self.start.index(), 0);
        self.queue_operations += 1;

        while let Some((index, distance)) = queue.pop() {
            self.queue_operations += 1;
            let vertex = VertexId::new(index);
            settled.insert(index);
            self.settled.push(vertex);

            for (next, weight) in graph.neighbors(vertex) {
                if settled.contains(next.index()) {
                    continue;
                }
                let candidate = distance.saturating_add(weight);
                if self.tree.relax(vertex, next, candidate) {
                    queue.push_or_decrease(next.index(), candidate);
                    self.queue_operations += 1;
                }
            }
        }
    }
}

impl GraphAlgorithm for Dijkstra {
    fn kind(&self) -> AlgorithmKind {
        match self.strategy {
            QueueStrategy::Lazy => AlgorithmKind::DijkstraLazy,
            QueueStrategy::Eager => AlgorithmKind::DijkstraEager,
        }
    }

    fn check(&self, graph: &Graph) -> std::result::Result<(), Precondition> {
        require_start(graph, self.start)?;
        if let Some(end) = self.end {
            require_vertex(graph, end)?;
        }
        require_non_negative(graph)
    }

    fn execute(&mut self, graph: &Graph) {
        self.clear();
        if !graph.contains_vertex(self.start) {
            return;
        }

        self.tree = ShortestPathTree::new(graph.vertex_count(), self.start);
        let mut settled = BitSet::new(graph.vertex_count());
        match self.strategy {
            QueueStrategy::Lazy => self.run_lazy(graph, &mut settled),
            QueueStrategy::Eager => self.run_eager(graph, &mut settled),
        }

        log::debug!(
            "{} settled {} vertices with {} queue operations",
            self.kind(),
            self.settled.len(),
            self.queue_operations
        );
    }

    fn clear(&mut self) {
        self.tree = ShortestPathTree::default();
        self.settled.clear();
        self.queue_operations = 0;
    }

    fn outcome(&self) -> Outcome {
        if self.settled.is_empty() {
            return Outcome::Pending;
        }
        Outcome::ShortestPaths {
            distances: self.tree.distances().to_vec(),
            path: self.end.and_then(|end| self.path_to(end)),
            negative_cycle: false,
        }
    }

    fn reveal_units(&self) -> Vec<RevealUnit> {
        match self.end {
            Some(end) => self
                .path_to(end)
                .map(|path| RevealUnit::along(&path))
                .unwrap_or_default(),
            None => self
                .tree
                .tree_edges(&self.settled)
                .map(|(from, to)| RevealUnit::edge(from, to))
                .collect(),
        }
    }

    fn settings(&self) -> &'static [SettingSpec] {
        SETTINGS
    }

    fn get_setting(&self, name: &str) -> Result<SettingValue> {
        match name {
            "start" => Ok(SettingValue::Vertex(self.start)),
            "end" => Ok(SettingValue::OptionalVertex(self.end)),
            _ => Err(Error::UnknownSetting(name.to_string())),
        }
    }

    fn set_setting(&mut self, name: &str, value: SettingValue) -> Result<()> {
        let spec = find_setting(SETTINGS, name)?;
        match spec.name {
            "end" => self.end = value.into_optional_vertex(spec)?,
            _ => self.start = value.into_vertex(spec)?,
        }
        Ok(())
    }
}
