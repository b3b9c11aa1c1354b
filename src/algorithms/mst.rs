//! Prim's minimum spanning tree.
//!
//! The tree grows from the start vertex by repeatedly adding the lightest crossing
//! edge. When the queue runs dry and vertices remain outside the tree, a new tree is
//! started from the lowest-numbered of them, so a disconnected graph yields a minimum
//! spanning forest.
//!
//! The lazy variant queues every crossing edge it sees and skips edges whose far end
//! has joined the tree by the time they are popped. The eager variant keeps only the
//! best known crossing edge for each outside vertex and lowers it in place.

use std::{cmp::Reverse, collections::BinaryHeap};

use crate::{
    algorithms::{
        require_directed, require_start,
        schema::{self, find_setting, SettingSpec, SettingValue},
        AlgorithmKind, GraphAlgorithm, Outcome, QueueStrategy, Requirements, RevealUnit,
    },
    graph::{Edge, Graph, VertexId, Weight},
    utils::{BitSet, IndexedMinHeap},
    Error, Precondition, Result,
};

const SETTINGS: &[SettingSpec] = &[schema::START];

/// Prim's algorithm over undirected graphs.
///
/// # Examples
///
/// ```rust
/// use graphlab::algorithms::{GraphAlgorithm, Prim, QueueStrategy};
/// use graphlab::graph::{Graph, StorageKind};
///
/// let graph = Graph::from_edges(false, StorageKind::AdjacencyList, [(0, 1, 4), (0, 2, 1), (2, 1, 2)]);
/// let mut prim = Prim::new(QueueStrategy::Lazy);
/// prim.run(&graph)?;
///
/// assert_eq!(prim.total(), 3);
/// # Ok::<(), graphlab::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Prim {
    strategy: QueueStrategy,
    start: VertexId,
    /// Tree edges in the order they joined, oriented away from the root
    edges: Vec<Edge>,
    total: Weight,
    queue_operations: usize,
    executed: bool,
}

impl Prim {
    /// Creates a Prim run from vertex 0 with the given queue discipline.
    #[must_use]
    pub fn new(strategy: QueueStrategy) -> Self {
        Prim {
            strategy,
            ..Self::default()
        }
    }

    /// Sets the root of the first tree.
    #[must_use]
    pub fn starting_at(mut self, start: VertexId) -> Self {
        self.start = start;
        self
    }

    /// Returns the queue discipline.
    #[must_use]
    pub fn strategy(&self) -> QueueStrategy {
        self.strategy
    }

    /// Returns the tree edges of the last run.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the total weight of the last spanning forest.
    #[must_use]
    pub fn total(&self) -> Weight {
        self.total
    }

    /// Returns the number of priority queue operations performed by the last run.
    #[must_use]
    pub fn queue_operations(&self) -> usize {
        self.queue_operations
    }

    fn join(&mut self, from: VertexId, to: VertexId, weight: Weight) {
        self.edges.push(Edge { from, to, weight });
        self.total = self.total.saturating_add(weight);
    }

    fn grow_lazy(&mut self, graph: &Graph, root: VertexId, tree: &mut BitSet) {
        let mut queue = BinaryHeap::new();
        tree.insert(root.index());
        for (next, weight) in graph.neighbors(root) {
            queue.push(Reverse((weight, next, root)));
            self.queue_operations += 1;
        }

        while let Some(Reverse((weight, vertex, parent))) = queue.pop() {
            self.queue_operations += 1;
            if !tree.insert(vertex.index()) {
                continue;
            }
            self.join(parent, vertex, weight);

            for (next, weight) in graph.neighbors(vertex) {
                if !tree.contains(next.index()) {
                    queue.push(Reverse((weight, next, vertex)));
                    self.queue_operations += 1;
                }
            }
        }
    }

    fn grow_eager(
        &mut self,
        graph: &Graph,
        root: VertexId,
        tree: &mut BitSet,
        best: &mut [Option<(VertexId, Weight)>],
    ) {
        let mut queue = IndexedMinHeap::with_capacity(graph.vertex_count());
        queue.push_or_decrease(root.index(), 0);
        self.queue_operations += 1;

        while let Some((index, _)) = queue.pop() {
            self.queue_operations += 1;
            let vertex = VertexId::new(index);
            tree.insert(index);
            if let Some((parent, weight)) = best[index] {
                self.join(parent, vertex, weight);
            }

            for (next, weight) in graph.neighbors(vertex) {
                let slot = &mut best[next.index()];
                if tree.contains(next.index()) || slot.is_some_and(|(_, known)| known <= weight) {
                    continue;
                }
                *slot = Some((vertex, weight));
                queue.push_or_decrease(next.index(), weight);
                self.queue_operations += 1;
            }
        }
    }
}

impl GraphAlgorithm for Prim {
    fn kind(&self) -> AlgorithmKind {
        match self.strategy {
            QueueStrategy::Lazy => AlgorithmKind::PrimLazy,
            QueueStrategy::Eager => AlgorithmKind::PrimEager,
        }
    }

    fn check(&self, graph: &Graph) -> std::result::Result<(), Precondition> {
        require_start(graph, self.start)?;
        require_directed(graph, false)
    }

    fn execute(&mut self, graph: &Graph) {
        self.clear();
        self.executed = true;
        if !graph.contains_vertex(self.start) {
            return;
        }

        let n = graph.vertex_count();
        let mut tree = BitSet::new(n);
        let mut best = vec![None; n];
        let roots = std::iter::once(self.start).chain(graph.vertices());

        for root in roots {
            if tree.contains(root.index()) {
                continue;
            }
            match self.strategy {
                QueueStrategy::Lazy => self.grow_lazy(graph, root, &mut tree),
                QueueStrategy::Eager => self.grow_eager(graph, root, &mut tree, &mut best),
            }
        }

        log::debug!(
            "{} spanned {} vertices with {} edges, total weight {}",
            self.kind(),
            n,
            self.edges.len(),
            self.total
        );
    }

    fn clear(&mut self) {
        self.edges.clear();
        self.total = 0;
        self.queue_operations = 0;
        self.executed = false;
    }

    fn outcome(&self) -> Outcome {
        if !self.executed {
            return Outcome::Pending;
        }
        Outcome::SpanningTree {
            edges: self.edges.clone(),
            total: self.total,
        }
    }

    fn reveal_units(&self) -> Vec<RevealUnit> {
        self.edges
            .iter()
            .map(|edge| RevealUnit::edge(edge.from, edge.to))
            .collect()
    }

    fn requirements(&self) -> Requirements {
        Requirements {
            directed: Some(false),
            ..Requirements::default()
        }
    }

    fn settings(&self) -> &'static [SettingSpec] {
        SETTINGS
    }

    fn get_setting(&self, name: &str) -> Result<SettingValue> {
        match name {
            "start" => Ok(SettingValue::Vertex(self.start)),
            _ => Err(Error::UnknownSetting(name.to_string())),
        }
    }

    fn set_setting(&mut self, name: &str, value: SettingValue) -> Result<()> {
        let spec = find_setting(SETTINGS, name)?;
        self.start = value.into_vertex(spec)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use strum::IntoEnumIterator;

    use super::*;
    use crate::graph::StorageKind;

    fn v(index: usize) -> VertexId {
        VertexId::new(index)
    }

    fn kite(kind: StorageKind) -> Graph {
        Graph::from_edges(
            false,
            kind,
            [(0, 1, 4), (0, 2, 1), (2, 1, 2), (1, 3, 5), (2, 3, 8)],
        )
    }

    #[test]
    fn test_kite_tree() {
        for kind in StorageKind::iter() {
            for strategy in [QueueStrategy::Lazy, QueueStrategy::Eager] {
                let mut prim = Prim::new(strategy);
                prim.run(&kite(kind)).unwrap();

                assert_eq!(prim.total(), 8);
                assert_eq!(
                    prim.edges(),
                    &[
                        Edge { from: v(0), to: v(2), weight: 1 },
                        Edge { from: v(2), to: v(1), weight: 2 },
                        Edge { from: v(1), to: v(3), weight: 5 },
                    ]
                );
            }
        }
    }

    #[test]
    fn test_lazy_and_eager_totals_agree() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let mut graph = Graph::with_vertices(30, false, StorageKind::AdjacencyList);
            graph.generate_random_weighted_edges(0.15, -5..=20, &mut rng);

            let mut lazy = Prim::new(QueueStrategy::Lazy);
            let mut eager = Prim::new(QueueStrategy::Eager);
            lazy.run(&graph).unwrap();
            eager.run(&graph).unwrap();

            assert_eq!(lazy.total(), eager.total());
            assert_eq!(lazy.edges().len(), eager.edges().len());
        }
    }

    #[test]
    fn test_disconnected_graph_gives_forest() {
        let mut graph = Graph::from_edges(false, StorageKind::AdjacencyList, [(0, 1, 3), (2, 3, 4)]);
        graph.add_node();
        let mut prim = Prim::new(QueueStrategy::Eager);
        prim.run(&graph).unwrap();

        // 5 vertices in 3 trees
        assert_eq!(prim.edges().len(), 2);
        assert_eq!(prim.total(), 7);
    }

    #[test]
    fn test_start_vertex_roots_first_tree() {
        let mut prim = Prim::new(QueueStrategy::Lazy);
        prim.set_setting("start", SettingValue::Vertex(v(3))).unwrap();
        prim.run(&kite(StorageKind::AdjacencyList)).unwrap();

        assert_eq!(prim.edges()[0].from, v(3));
        assert_eq!(prim.total(), 8);
        assert_eq!(prim.describe(), "Prim's MST (lazy) [start=3]");
    }

    #[test]
    fn test_lazy_pays_for_stale_edges() {
        let mut lazy = Prim::new(QueueStrategy::Lazy);
        let mut eager = Prim::new(QueueStrategy::Eager);
        let graph = Graph::complete(8, false, StorageKind::AdjacencyList, 1);
        lazy.run(&graph).unwrap();
        eager.run(&graph).unwrap();
        assert!(lazy.queue_operations() > eager.queue_operations());
    }

    #[test]
    fn test_requires_undirected() {
        let graph = Graph::from_edges(true, StorageKind::AdjacencyList, [(0, 1, 1)]);
        assert_eq!(
            Prim::new(QueueStrategy::Lazy).check(&graph),
            Err(Precondition::RequiresUndirected)
        );
    }

    #[test]
    fn test_reveal_and_outcome() {
        let graph = Graph::from_edges(false, StorageKind::AdjacencyList, [(0, 1, 2)]);
        let mut prim = Prim::new(QueueStrategy::Eager);
        assert_eq!(prim.outcome(), Outcome::Pending);
        prim.run(&graph).unwrap();

        assert_eq!(prim.reveal_units(), vec![RevealUnit::edge(v(0), v(1))]);
        assert_eq!(
            prim.outcome(),
            Outcome::SpanningTree {
                edges: vec![Edge { from: v(0), to: v(1), weight: 2 }],
                total: 2
            }
        );
    }
}
