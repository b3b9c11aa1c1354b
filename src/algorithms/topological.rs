//! Topological sorting of directed acyclic graphs.
//!
//! - [`SortStrategy::Kahn`] repeatedly removes vertices whose residual in-degree is
//!   zero. If vertices remain with positive residual in-degree, they sit on or behind a
//!   cycle.
//! - [`SortStrategy::Dfs`] emits vertices in reverse DFS finishing order. Reaching a
//!   vertex that is still on the DFS path (a back edge) proves a cycle.
//!
//! Both strategies refuse undirected graphs and cyclic graphs in their check, and both
//! start from the lowest-numbered candidates, so their output is deterministic for a
//! given graph.

use std::collections::VecDeque;

use crate::{
    algorithms::{
        require_directed, require_vertices, AlgorithmKind, GraphAlgorithm, Outcome,
        Requirements, RevealUnit,
    },
    graph::{Graph, VertexId},
    Precondition,
};

/// How [`TopologicalSort`] orders the vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortStrategy {
    /// Kahn's in-degree peeling
    #[default]
    Kahn,
    /// Reverse DFS post-order
    Dfs,
}

/// Linear ordering where every edge `u -> v` places `u` before `v`.
#[derive(Debug, Clone, Default)]
pub struct TopologicalSort {
    strategy: SortStrategy,
    order: Vec<VertexId>,
}

impl TopologicalSort {
    /// Creates a sorter with the given strategy.
    #[must_use]
    pub fn new(strategy: SortStrategy) -> Self {
        TopologicalSort {
            strategy,
            order: Vec::new(),
        }
    }

    /// Returns the order computed by the last run.
    #[must_use]
    pub fn order(&self) -> &[VertexId] {
        &self.order
    }

    /// Returns the position of every vertex in the last order, indexed by vertex.
    #[must_use]
    pub fn positions(&self) -> Vec<usize> {
        let mut positions = vec![0; self.order.len()];
        for (position, vertex) in self.order.iter().enumerate() {
            positions[vertex.index()] = position;
        }
        positions
    }
}

/// Kahn's algorithm. Returns `None` if the graph has a cycle.
fn kahn(graph: &Graph) -> Option<Vec<VertexId>> {
    let mut residual = graph.in_degrees();
    let mut ready: VecDeque<VertexId> = graph
        .vertices()
        .filter(|vertex| residual[vertex.index()] == 0)
        .collect();
    let mut order = Vec::with_capacity(graph.vertex_count());

    while let Some(vertex) = ready.pop_front() {
        order.push(vertex);
        for (next, _) in graph.neighbors(vertex) {
            let degree = &mut residual[next.index()];
            *degree -= 1;
            if *degree == 0 {
                ready.push_back(next);
            }
        }
    }

    // Anything left over kept a positive residual in-degree
    (order.len() == graph.vertex_count()).then_some(order)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Reverse post-order DFS. Returns `None` on the first back edge.
#[allow(clippy::items_after_statements)]
fn dfs_order(graph: &Graph) -> Option<Vec<VertexId>> {
    let n = graph.vertex_count();
    let mut color = vec![Color::White; n];
    let mut postorder = Vec::with_capacity(n);

    enum Step {
        Enter(VertexId),
        Exit(VertexId),
    }

    for root in graph.vertices() {
        if color[root.index()] != Color::White {
            continue;
        }
        let mut stack = vec![Step::Enter(root)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(vertex) => {
                    match color[vertex.index()] {
                        Color::Black => continue,
                        Color::Gray => return None,
                        Color::White => {}
                    }
                    color[vertex.index()] = Color::Gray;
                    stack.push(Step::Exit(vertex));

                    let successors: Vec<VertexId> =
                        graph.neighbors(vertex).map(|(next, _)| next).collect();
                    for &next in successors.iter().rev() {
                        match color[next.index()] {
                            Color::Gray => return None,
                            Color::White => stack.push(Step::Enter(next)),
                            Color::Black => {}
                        }
                    }
                }
                Step::Exit(vertex) => {
                    color[vertex.index()] = Color::Black;
                    postorder.push(vertex);
                }
            }
        }
    }

    postorder.reverse();
    Some(postorder)
}

impl TopologicalSort {
    fn sort(&self, graph: &Graph) -> Option<Vec<VertexId>> {
        match self.strategy {
            SortStrategy::Kahn => kahn(graph),
            SortStrategy::Dfs => dfs_order(graph),
        }
    }
}

impl GraphAlgorithm for TopologicalSort {
    fn kind(&self) -> AlgorithmKind {
        match self.strategy {
            SortStrategy::Kahn => AlgorithmKind::TopologicalKahn,
            SortStrategy::Dfs => AlgorithmKind::TopologicalDfs,
        }
    }

    fn check(&self, graph: &Graph) -> std::result::Result<(), Precondition> {
        require_vertices(graph)?;
        require_directed(graph, true)?;
        match self.sort(graph) {
            Some(_) => Ok(()),
            None => Err(Precondition::CycleDetected),
        }
    }

    fn execute(&mut self, graph: &Graph) {
        self.order = self.sort(graph).unwrap_or_default();
    }

    fn clear(&mut self) {
        self.order.clear();
    }

    fn outcome(&self) -> Outcome {
        if self.order.is_empty() {
            return Outcome::Pending;
        }
        Outcome::Order {
            order: self.order.clone(),
        }
    }

    fn reveal_units(&self) -> Vec<RevealUnit> {
        self.order
            .iter()
            .map(|&vertex| RevealUnit::Vertex { vertex })
            .collect()
    }

    fn requirements(&self) -> Requirements {
        Requirements {
            directed: Some(true),
            acyclic: true,
            ..Requirements::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use strum::IntoEnumIterator;

    use super::*;
    use crate::graph::StorageKind;

    fn v(index: usize) -> VertexId {
        VertexId::new(index)
    }

    fn assert_respects_edges(graph: &Graph, sorter: &TopologicalSort) {
        let positions = sorter.positions();
        assert_eq!(sorter.order().len(), graph.vertex_count());
        for edge in graph.edges() {
            assert!(positions[edge.from.index()] < positions[edge.to.index()]);
        }
    }

    #[test]
    fn test_kahn_order() {
        // 0 -> 2, 1 -> 2, 2 -> 3, 1 -> 3
        let graph = Graph::from_edges(
            true,
            StorageKind::AdjacencyList,
            [(0, 2, 1), (1, 2, 1), (2, 3, 1), (1, 3, 1)],
        );
        let mut sorter = TopologicalSort::new(SortStrategy::Kahn);
        sorter.run(&graph).unwrap();
        assert_eq!(sorter.order(), &[v(0), v(1), v(2), v(3)]);
    }

    #[test]
    fn test_dfs_order() {
        let graph = Graph::from_edges(
            true,
            StorageKind::AdjacencyList,
            [(0, 2, 1), (1, 2, 1), (2, 3, 1), (1, 3, 1)],
        );
        let mut sorter = TopologicalSort::new(SortStrategy::Dfs);
        sorter.run(&graph).unwrap();
        assert_eq!(sorter.order(), &[v(1), v(0), v(2), v(3)]);
    }

    #[test]
    fn test_random_dags_are_respected() {
        let mut rng = StdRng::seed_from_u64(17);
        for kind in StorageKind::iter() {
            for strategy in [SortStrategy::Kahn, SortStrategy::Dfs] {
                let mut graph = Graph::with_vertices(30, true, kind);
                for _ in 0..80 {
                    let a = rng.gen_range(0..30);
                    let b = rng.gen_range(0..30);
                    if a != b {
                        graph.add_edge(v(a.min(b)), v(a.max(b)), 1);
                    }
                }

                let mut sorter = TopologicalSort::new(strategy);
                sorter.run(&graph).unwrap();
                assert_respects_edges(&graph, &sorter);
            }
        }
    }

    #[test]
    fn test_two_cycle_is_refused() {
        let graph = Graph::from_edges(true, StorageKind::AdjacencyMatrix, [(0, 1, 1), (1, 0, 1)]);
        for strategy in [SortStrategy::Kahn, SortStrategy::Dfs] {
            assert_eq!(
                TopologicalSort::new(strategy).check(&graph),
                Err(Precondition::CycleDetected)
            );
        }
    }

    #[test]
    fn test_cycle_behind_acyclic_prefix() {
        let graph = Graph::from_edges(
            true,
            StorageKind::AdjacencyList,
            [(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 1, 1)],
        );
        for strategy in [SortStrategy::Kahn, SortStrategy::Dfs] {
            assert_eq!(
                TopologicalSort::new(strategy).check(&graph),
                Err(Precondition::CycleDetected)
            );
        }
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let graph = Graph::from_edges(true, StorageKind::AdjacencyList, [(0, 0, 1)]);
        assert_eq!(
            TopologicalSort::new(SortStrategy::Dfs).check(&graph),
            Err(Precondition::CycleDetected)
        );
    }

    #[test]
    fn test_undirected_is_refused() {
        let graph = Graph::from_edges(false, StorageKind::AdjacencyList, [(0, 1, 1)]);
        assert_eq!(
            TopologicalSort::new(SortStrategy::Kahn).check(&graph),
            Err(Precondition::RequiresDirected)
        );
    }

    #[test]
    fn test_requirements_and_reveal() {
        let graph = Graph::from_edges(true, StorageKind::AdjacencyList, [(1, 0, 1)]);
        let mut sorter = TopologicalSort::new(SortStrategy::Kahn);
        assert!(sorter.requirements().acyclic);
        sorter.run(&graph).unwrap();
        assert_eq!(
            sorter.reveal_units(),
            vec![RevealUnit::Vertex { vertex: v(1) }, RevealUnit::Vertex { vertex: v(0) }]
        );
    }
}
