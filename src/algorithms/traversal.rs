//! Graph traversal algorithms.
//!
//! All three traversals record the tree edge `(parent, child)` of every newly
//! discovered vertex in a [`VisitedEdges`], in discovery order. They visit exactly the
//! vertices reachable from the start vertex, so on a connected graph the record holds
//! `|V| - 1` edges.
//!
//! # Algorithms
//!
//! - [`Bfs`] - FIFO frontier; a vertex is discovered when it is enqueued
//! - [`Dfs`] - Explicit stack; a vertex is discovered when it is popped
//! - [`RecursiveDfs`] - Native recursion, refused on graphs larger than its depth limit
//!
//! The two depth-first variants discover the same vertices but may record different
//! tree edges, because the explicit stack commits to a parent later than recursion
//! does. Both orders depend on neighbor enumeration order.

use std::collections::VecDeque;

use crate::{
    algorithms::{
        require_at_most, require_start,
        schema::{self, find_setting, SettingSpec, SettingValue},
        AlgorithmKind, GraphAlgorithm, Outcome, Requirements, RevealUnit,
    },
    graph::{Graph, VertexId, VisitedEdges},
    utils::BitSet,
    Error, Precondition, Result,
};

/// Default recursion depth limit of [`RecursiveDfs`].
pub const DEFAULT_DEPTH_LIMIT: usize = 10_000;

const DEPTH_LIMIT: SettingSpec = SettingSpec::integer(
    "depth_limit",
    "Largest graph the recursive traversal accepts",
);

const START_ONLY: &[SettingSpec] = &[schema::START];
const RECURSIVE_SETTINGS: &[SettingSpec] = &[schema::START, DEPTH_LIMIT];

fn get_start(start: VertexId, name: &str) -> Result<SettingValue> {
    match name {
        "start" => Ok(SettingValue::Vertex(start)),
        _ => Err(Error::UnknownSetting(name.to_string())),
    }
}

fn reveal_edges(edges: &VisitedEdges) -> Vec<RevealUnit> {
    edges
        .iter()
        .map(|(from, to)| RevealUnit::edge(from, to))
        .collect()
}

/// Breadth-first search from a start vertex.
#[derive(Debug, Clone, Default)]
pub struct Bfs {
    start: VertexId,
    edges: VisitedEdges,
}

impl Bfs {
    /// Creates a BFS starting at vertex 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a BFS starting at `start`.
    #[must_use]
    pub fn starting_at(start: VertexId) -> Self {
        Bfs {
            start,
            ..Self::default()
        }
    }

    /// Returns the discovery edges of the last run.
    #[must_use]
    pub fn edges(&self) -> &VisitedEdges {
        &self.edges
    }
}

impl GraphAlgorithm for Bfs {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Bfs
    }

    fn check(&self, graph: &Graph) -> std::result::Result<(), Precondition> {
        require_start(graph, self.start)
    }

    fn execute(&mut self, graph: &Graph) {
        self.clear();
        if !graph.contains_vertex(self.start) {
            return;
        }

        let mut visited = BitSet::new(graph.vertex_count());
        let mut queue = VecDeque::new();
        visited.insert(self.start.index());
        queue.push_back(self.start);

        while let Some(vertex) = queue.pop_front() {
            for (next, _) in graph.neighbors(vertex) {
                if visited.insert(next.index()) {
                    self.edges.insert(vertex, next);
                    queue.push_back(next);
                }
            }
        }
    }

    fn clear(&mut self) {
        self.edges.clear();
    }

    fn outcome(&self) -> Outcome {
        Outcome::Traversal {
            edges: self.edges.clone(),
        }
    }

    fn reveal_units(&self) -> Vec<RevealUnit> {
        reveal_edges(&self.edges)
    }

    fn settings(&self) -> &'static [SettingSpec] {
        START_ONLY
    }

    fn get_setting(&self, name: &str) -> Result<SettingValue> {
        get_start(self.start, name)
    }

    fn set_setting(&mut self, name: &str, value: SettingValue) -> Result<()> {
        let spec = find_setting(START_ONLY, name)?;
        self.start = value.into_vertex(spec)?;
        Ok(())
    }
}

/// Depth-first search from a start vertex, driven by an explicit stack.
#[derive(Debug, Clone, Default)]
pub struct Dfs {
    start: VertexId,
    edges: VisitedEdges,
}

impl Dfs {
    /// Creates a DFS starting at vertex 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a DFS starting at `start`.
    #[must_use]
    pub fn starting_at(start: VertexId) -> Self {
        Dfs {
            start,
            ..Self::default()
        }
    }

    /// Returns the discovery edges of the last run.
    #[must_use]
    pub fn edges(&self) -> &VisitedEdges {
        &self.edges
    }
}

impl GraphAlgorithm for Dfs {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Dfs
    }

    fn check(&self, graph: &Graph) -> std::result::Result<(), Precondition> {
        require_start(graph, self.start)
    }

    fn execute(&mut self, graph: &Graph) {
        self.clear();
        if !graph.contains_vertex(self.start) {
            return;
        }

        let mut visited = BitSet::new(graph.vertex_count());
        // (parent, vertex); the parent is only committed when the vertex is popped
        let mut stack: Vec<(Option<VertexId>, VertexId)> = vec![(None, self.start)];
        let mut successors = Vec::new();

        while let Some((parent, vertex)) = stack.pop() {
            if !visited.insert(vertex.index()) {
                continue;
            }
            if let Some(parent) = parent {
                self.edges.insert(parent, vertex);
            }

            // Reverse so the first neighbor is explored first
            successors.clear();
            successors.extend(graph.neighbors(vertex).map(|(next, _)| next));
            for &next in successors.iter().rev() {
                if !visited.contains(next.index()) {
                    stack.push((Some(vertex), next));
                }
            }
        }
    }

    fn clear(&mut self) {
        self.edges.clear();
    }

    fn outcome(&self) -> Outcome {
        Outcome::Traversal {
            edges: self.edges.clone(),
        }
    }

    fn reveal_units(&self) -> Vec<RevealUnit> {
        reveal_edges(&self.edges)
    }

    fn settings(&self) -> &'static [SettingSpec] {
        START_ONLY
    }

    fn get_setting(&self, name: &str) -> Result<SettingValue> {
        get_start(self.start, name)
    }

    fn set_setting(&mut self, name: &str, value: SettingValue) -> Result<()> {
        let spec = find_setting(START_ONLY, name)?;
        self.start = value.into_vertex(spec)?;
        Ok(())
    }
}

/// Depth-first search by recursion.
///
/// Recursion depth is bounded by the vertex count, so graphs with more than
/// `depth_limit` vertices fail the check with [`Precondition::TooManyVertices`]
/// instead of risking the native stack.
#[derive(Debug, Clone)]
pub struct RecursiveDfs {
    start: VertexId,
    depth_limit: usize,
    edges: VisitedEdges,
}

impl Default for RecursiveDfs {
    fn default() -> Self {
        RecursiveDfs {
            start: VertexId::default(),
            depth_limit: DEFAULT_DEPTH_LIMIT,
            edges: VisitedEdges::new(),
        }
    }
}

impl RecursiveDfs {
    /// Creates a recursive DFS starting at vertex 0 with the default depth limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recursive DFS starting at `start`.
    #[must_use]
    pub fn starting_at(start: VertexId) -> Self {
        RecursiveDfs {
            start,
            ..Self::default()
        }
    }

    /// Sets the largest vertex count this traversal accepts.
    #[must_use]
    pub fn with_depth_limit(mut self, depth_limit: usize) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    /// Returns the discovery edges of the last run.
    #[must_use]
    pub fn edges(&self) -> &VisitedEdges {
        &self.edges
    }

    fn visit(&mut self, graph: &Graph, vertex: VertexId, visited: &mut BitSet) {
        for (next, _) in graph.neighbors(vertex) {
            if visited.insert(next.index()) {
                self.edges.insert(vertex, next);
                self.visit(graph, next, visited);
            }
        }
    }
}

impl GraphAlgorithm for RecursiveDfs {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::RecursiveDfs
    }

    fn check(&self, graph: &Graph) -> std::result::Result<(), Precondition> {
        require_start(graph, self.start)?;
        require_at_most(graph, self.depth_limit)
    }

    fn execute(&mut self, graph: &Graph) {
        self.clear();
        if !graph.contains_vertex(self.start) || graph.vertex_count() > self.depth_limit {
            return;
        }

        let mut visited = BitSet::new(graph.vertex_count());
        visited.insert(self.start.index());
        self.visit(graph, self.start, &mut visited);
    }

    fn clear(&mut self) {
        self.edges.clear();
    }

    fn outcome(&self) -> Outcome {
        Outcome::Traversal {
            edges: self.edges.clone(),
        }
    }

    fn reveal_units(&self) -> Vec<RevealUnit> {
        reveal_edges(&self.edges)
    }

    fn requirements(&self) -> Requirements {
        Requirements {
            max_vertices: Some(self.depth_limit),
            ..Default::default()
        }
    }

    fn settings(&self) -> &'static [SettingSpec] {
        RECURSIVE_SETTINGS
    }

    fn get_setting(&self, name: &str) -> Result<SettingValue> {
        match name {
            "depth_limit" => Ok(SettingValue::Integer(
                i64::try_from(self.depth_limit).unwrap_or(i64::MAX),
            )),
            _ => get_start(self.start, name),
        }
    }

    fn set_setting(&mut self, name: &str, value: SettingValue) -> Result<()> {
        let spec = find_setting(RECURSIVE_SETTINGS, name)?;
        match spec.name {
            "depth_limit" => {
                let limit = value.into_integer(spec)?;
                self.depth_limit = usize::try_from(limit).map_err(|_| Error::SettingType {
                    name: spec.name,
                    expected: "non-negative integer",
                })?;
            }
            _ => self.start = value.into_vertex(spec)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::graph::StorageKind;

    fn v(index: usize) -> VertexId {
        VertexId::new(index)
    }

    /// 0 - 1 - 3
    /// |       |
    /// 2 ----- 4     5 (isolated)
    fn sample(kind: StorageKind) -> Graph {
        let mut graph =
            Graph::from_edges(false, kind, [(0, 1, 1), (0, 2, 1), (1, 3, 1), (2, 4, 1), (3, 4, 1)]);
        graph.add_node();
        graph
    }

    fn discovered(edges: &VisitedEdges) -> Vec<usize> {
        let mut vertices: Vec<usize> = edges
            .iter()
            .flat_map(|(a, b)| [a.index(), b.index()])
            .collect();
        vertices.sort_unstable();
        vertices.dedup();
        vertices
    }

    #[test]
    fn test_bfs_discovery_order() {
        let graph = sample(StorageKind::AdjacencyList);
        let mut bfs = Bfs::new();
        bfs.run(&graph).unwrap();

        assert_eq!(
            bfs.edges().as_slice(),
            &[(v(0), v(1)), (v(0), v(2)), (v(1), v(3)), (v(2), v(4))]
        );
    }

    #[test]
    fn test_dfs_discovery_order() {
        let graph = sample(StorageKind::AdjacencyList);
        let mut dfs = Dfs::new();
        dfs.run(&graph).unwrap();

        // 0 -> 1 -> 3 -> 4 -> 2
        assert_eq!(
            dfs.edges().as_slice(),
            &[(v(0), v(1)), (v(1), v(3)), (v(3), v(4)), (v(2), v(4))]
        );
    }

    #[test]
    fn test_traversals_reach_the_same_vertices() {
        for kind in StorageKind::iter() {
            let graph = sample(kind);
            let mut algorithms: Vec<Box<dyn GraphAlgorithm>> = vec![
                Box::new(Bfs::new()),
                Box::new(Dfs::new()),
                Box::new(RecursiveDfs::new()),
            ];

            for algorithm in &mut algorithms {
                algorithm.run(&graph).unwrap();
                let Outcome::Traversal { edges } = algorithm.outcome() else {
                    panic!("traversal outcome expected");
                };
                assert_eq!(edges.len(), 4);
                assert_eq!(discovered(&edges), vec![0, 1, 2, 3, 4]);
            }
        }
    }

    #[test]
    fn test_directed_traversal_follows_arcs() {
        let graph = Graph::from_edges(true, StorageKind::AdjacencyList, [(1, 0, 1), (1, 2, 1)]);
        let mut bfs = Bfs::new();
        bfs.run(&graph).unwrap();
        assert!(bfs.edges().is_empty());

        bfs.set_setting("start", SettingValue::Vertex(v(1))).unwrap();
        bfs.run(&graph).unwrap();
        assert_eq!(bfs.edges().len(), 2);
    }

    #[test]
    fn test_traversal_preconditions() {
        let empty = Graph::undirected();
        assert_eq!(Bfs::new().check(&empty), Err(Precondition::EmptyGraph));

        let graph = sample(StorageKind::AdjacencyList);
        assert_eq!(
            Dfs::starting_at(v(10)).check(&graph),
            Err(Precondition::InvalidVertex {
                vertex: v(10),
                count: 6
            })
        );
    }

    #[test]
    fn test_recursive_depth_limit() {
        let graph = Graph::complete(5, false, StorageKind::AdjacencyList, 1);
        let dfs = RecursiveDfs::new().with_depth_limit(4);
        assert_eq!(
            dfs.check(&graph),
            Err(Precondition::TooManyVertices { count: 5, limit: 4 })
        );
        assert_eq!(dfs.requirements().max_vertices, Some(4));

        let mut dfs = dfs;
        dfs.set_setting("depth_limit", SettingValue::Integer(5)).unwrap();
        assert!(dfs.check(&graph).is_ok());
        assert!(dfs
            .set_setting("depth_limit", SettingValue::Integer(-1))
            .is_err());
    }

    #[test]
    fn test_long_path_with_explicit_stack() {
        let edges = (0..50_000).map(|i| (i, i + 1, 1));
        let graph = Graph::from_edges(false, StorageKind::AdjacencyList, edges);
        let mut dfs = Dfs::new();
        dfs.run(&graph).unwrap();
        assert_eq!(dfs.edges().len(), 50_000);
    }

    #[test]
    fn test_clear_then_rerun_is_identical() {
        let graph = sample(StorageKind::AdjacencyMatrix);
        let mut dfs = Dfs::new();
        dfs.run(&graph).unwrap();
        let first = dfs.outcome();

        dfs.clear();
        assert!(dfs.edges().is_empty());
        dfs.run(&graph).unwrap();
        assert_eq!(dfs.outcome(), first);
    }

    #[test]
    fn test_describe_lists_settings() {
        let dfs = RecursiveDfs::starting_at(v(2));
        assert_eq!(
            dfs.describe(),
            "Depth-first search (recursive) [start=2, depth_limit=10000]"
        );
    }
}
