//! Weighted graphs with interchangeable storage.
//!
//! This module provides [`Graph`], the data structure every algorithm in the crate runs
//! against. A graph holds vertices labeled `0..N-1` and weighted edges between them. It
//! is either directed or undirected (fixed at construction) and is stored either as an
//! adjacency list or an adjacency matrix (also fixed at construction, see
//! [`Graph::to_storage`] to convert).
//!
//! # Key Components
//!
//! - [`VertexId`] - Strongly-typed vertex identifier
//! - [`Graph`] - The graph itself, dispatching to one of the two encodings
//! - [`AdjacencyList`] / [`AdjacencyMatrix`] - The encodings, both implementing [`GraphStorage`]
//! - [`VisitedEdges`] - Ordered, duplicate-free edge record used as an algorithm trace
//!
//! # Undirected Graphs
//!
//! Every undirected edge `(u, v, w)` is stored as the two arcs `u -> v` and `v -> u`.
//! [`Graph::edge_count`] counts the logical edge once, and [`Graph::edges`] yields it
//! once (with `from <= to`). A self-loop is stored as a single arc.
//!
//! # Iteration Order
//!
//! Traversal follows container order: insertion order for the adjacency list and
//! ascending vertex order for the matrix. Algorithms whose output order depends on
//! neighbor order (DFS, Hierholzer) can therefore give different but equally valid
//! answers for the two encodings.
//!
//! # Examples
//!
//! ```rust
//! use graphlab::graph::{Graph, StorageKind, VertexId};
//!
//! let mut graph = Graph::new(false, StorageKind::AdjacencyMatrix);
//! graph.add_edge(VertexId::new(0), VertexId::new(1), 4);
//! graph.add_edge(VertexId::new(1), VertexId::new(2), 2);
//!
//! assert_eq!(graph.vertex_count(), 3);
//! assert_eq!(graph.edge_count(), 2);
//! assert!(graph.has_edge(VertexId::new(2), VertexId::new(1)));
//! ```

mod list;
mod matrix;
mod storage;
mod vertex;
mod visited;

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub use list::{AdjacencyList, ListNeighbors};
pub use matrix::{AdjacencyMatrix, MatrixNeighbors};
pub use storage::{GraphStorage, Weight, DEFAULT_WEIGHT};
pub use vertex::VertexId;
pub use visited::VisitedEdges;

/// Physical encoding of a [`Graph`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum StorageKind {
    /// Per-vertex neighbor vectors
    #[default]
    AdjacencyList,
    /// Dense `V x V` weight table
    AdjacencyMatrix,
}

/// A single weighted edge as reported by [`Graph::edges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Source vertex (the lower endpoint for undirected graphs)
    pub from: VertexId,
    /// Target vertex
    pub to: VertexId,
    /// Edge weight
    pub weight: Weight,
}

#[derive(Debug, Clone)]
enum Storage {
    List(AdjacencyList),
    Matrix(AdjacencyMatrix),
}

impl Storage {
    fn empty(kind: StorageKind, vertices: usize) -> Self {
        match kind {
            StorageKind::AdjacencyList => Storage::List(AdjacencyList::with_vertices(vertices)),
            StorageKind::AdjacencyMatrix => {
                Storage::Matrix(AdjacencyMatrix::with_vertices(vertices))
            }
        }
    }
}

/// Dispatches a storage call to whichever encoding is active.
macro_rules! with_storage {
    ($storage:expr, $inner:ident => $body:expr) => {
        match $storage {
            Storage::List($inner) => $body,
            Storage::Matrix($inner) => $body,
        }
    };
}

/// Outgoing `(target, weight)` pairs of one vertex, for either encoding.
pub enum Neighbors<'a> {
    /// Adjacency-list iterator
    List(ListNeighbors<'a>),
    /// Adjacency-matrix iterator
    Matrix(MatrixNeighbors<'a>),
    /// Vertex outside the graph
    Empty,
}

impl Iterator for Neighbors<'_> {
    type Item = (VertexId, Weight);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Neighbors::List(inner) => inner.next(),
            Neighbors::Matrix(inner) => inner.next(),
            Neighbors::Empty => None,
        }
    }
}

/// A directed or undirected weighted graph over vertices `0..N-1`.
///
/// The vertex count only grows, either through [`add_node`](Graph::add_node) or
/// implicitly when [`add_edge`](Graph::add_edge) names a vertex beyond the current
/// bounds. [`clear`](Graph::clear) is the only operation that shrinks it.
///
/// Parallel edges and self-loops are accepted as given; the adjacency matrix simply
/// cannot represent parallel edges and replaces the weight instead. Use
/// [`VisitedEdges`] where an algorithm needs a duplicate-free edge set.
#[derive(Debug, Clone)]
pub struct Graph {
    /// Active encoding
    storage: Storage,
    /// Whether edges are one-way
    directed: bool,
    /// Logical edge count (undirected pairs counted once)
    edge_count: usize,
}

impl Default for Graph {
    fn default() -> Self {
        Self::undirected()
    }
}

impl Graph {
    /// Creates an empty graph.
    ///
    /// # Arguments
    ///
    /// * `directed` - Whether edges are one-way
    /// * `kind` - Physical encoding
    #[must_use]
    pub fn new(directed: bool, kind: StorageKind) -> Self {
        Self::with_vertices(0, directed, kind)
    }

    /// Creates an empty undirected adjacency-list graph.
    #[must_use]
    pub fn undirected() -> Self {
        Self::new(false, StorageKind::AdjacencyList)
    }

    /// Creates an empty directed adjacency-list graph.
    #[must_use]
    pub fn directed() -> Self {
        Self::new(true, StorageKind::AdjacencyList)
    }

    /// Creates a graph with `vertices` isolated vertices.
    #[must_use]
    pub fn with_vertices(vertices: usize, directed: bool, kind: StorageKind) -> Self {
        Graph {
            storage: Storage::empty(kind, vertices),
            directed,
            edge_count: 0,
        }
    }

    /// Creates a complete graph on `vertices` vertices (no self-loops) with uniform `weight`.
    #[must_use]
    pub fn complete(vertices: usize, directed: bool, kind: StorageKind, weight: Weight) -> Self {
        let mut graph = Self::with_vertices(vertices, directed, kind);
        for from in 0..vertices {
            let first = if directed { 0 } else { from + 1 };
            for to in first..vertices {
                if from != to {
                    graph.add_edge(VertexId::new(from), VertexId::new(to), weight);
                }
            }
        }
        graph
    }

    /// Creates a random graph: `vertices` vertices, every pair connected with `probability`.
    ///
    /// See [`generate_random_edges`](Graph::generate_random_edges) for the cost of this call.
    pub fn random<R: Rng + ?Sized>(
        vertices: usize,
        probability: f64,
        directed: bool,
        kind: StorageKind,
        rng: &mut R,
    ) -> Self {
        let mut graph = Self::with_vertices(vertices, directed, kind);
        graph.generate_random_edges(probability, rng);
        graph
    }

    /// Builds a graph from `(from, to, weight)` triples given as raw indices.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use graphlab::graph::{Graph, StorageKind, VertexId};
    ///
    /// let graph = Graph::from_edges(true, StorageKind::AdjacencyList, [(0, 1, 2), (1, 2, 3)]);
    /// assert_eq!(graph.edge_weight(VertexId::new(1), VertexId::new(2)), Some(3));
    /// ```
    pub fn from_edges<I>(directed: bool, kind: StorageKind, edges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, Weight)>,
    {
        let mut graph = Self::new(directed, kind);
        for (from, to, weight) in edges {
            graph.add_edge(VertexId::new(from), VertexId::new(to), weight);
        }
        graph
    }

    /// Returns `true` if edges are one-way.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns the physical encoding of this graph.
    #[must_use]
    pub fn storage_kind(&self) -> StorageKind {
        match self.storage {
            Storage::List(_) => StorageKind::AdjacencyList,
            Storage::Matrix(_) => StorageKind::AdjacencyMatrix,
        }
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        with_storage!(&self.storage, s => s.vertex_count())
    }

    /// Returns the number of logical edges.
    ///
    /// Undirected edges are counted once even though they are stored as two arcs.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns `true` if the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// Returns `true` if `vertex` is a valid vertex of this graph.
    #[must_use]
    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        vertex.index() < self.vertex_count()
    }

    /// Appends an isolated vertex and returns its id (the previous vertex count).
    pub fn add_node(&mut self) -> VertexId {
        with_storage!(&mut self.storage, s => s.add_vertex())
    }

    /// Adds the edge `from -> to` with the given weight.
    ///
    /// The vertex set grows to `max(from, to) + 1` vertices if either endpoint is out
    /// of bounds. For undirected graphs the mirrored arc `to -> from` is recorded as
    /// well (a self-loop is recorded once). An endpoint whose vertex count cannot be
    /// represented leaves the graph unchanged.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, weight: Weight) {
        let Some(needed) = from.index().max(to.index()).checked_add(1) else {
            log::debug!("Ignoring edge {from} -> {to}: endpoint out of range");
            return;
        };
        let directed = self.directed;

        let created = with_storage!(&mut self.storage, s => {
            s.ensure_vertices(needed);
            let created = s.insert_arc(from, to, weight);
            if !directed && from != to {
                s.insert_arc(to, from, weight);
            }
            created
        });

        if created {
            self.edge_count += 1;
        }
    }

    /// Removes every edge `from -> to` (both arcs for undirected graphs).
    ///
    /// Returns `true` if anything was removed; removing a missing edge is a no-op.
    pub fn remove_edge(&mut self, from: VertexId, to: VertexId) -> bool {
        let directed = self.directed;

        let removed = with_storage!(&mut self.storage, s => {
            let removed = s.remove_arcs(from, to);
            if !directed && from != to {
                s.remove_arcs(to, from);
            }
            removed
        });

        self.edge_count -= removed.min(self.edge_count);
        removed > 0
    }

    /// Returns `true` if there is an edge `from -> to`.
    #[must_use]
    pub fn has_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.edge_weight(from, to).is_some()
    }

    /// Returns the weight of the edge `from -> to`, if present.
    #[must_use]
    pub fn edge_weight(&self, from: VertexId, to: VertexId) -> Option<Weight> {
        if !self.contains_vertex(from) || !self.contains_vertex(to) {
            return None;
        }
        with_storage!(&self.storage, s => s.arc_weight(from, to))
    }

    /// Returns an iterator over all vertex ids in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.vertex_count()).map(VertexId::new)
    }

    /// Returns the outgoing `(target, weight)` pairs of `vertex` in container order.
    ///
    /// An out-of-range vertex has no neighbors.
    #[must_use]
    pub fn neighbors(&self, vertex: VertexId) -> Neighbors<'_> {
        if !self.contains_vertex(vertex) {
            return Neighbors::Empty;
        }
        match &self.storage {
            Storage::List(list) => Neighbors::List(list.neighbors(vertex)),
            Storage::Matrix(matrix) => Neighbors::Matrix(matrix.neighbors(vertex)),
        }
    }

    /// Returns every logical edge once, in container order.
    ///
    /// For undirected graphs each edge is reported with `from <= to`.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let directed = self.directed;
        self.vertices().flat_map(move |from| {
            self.neighbors(from)
                .filter(move |&(to, _)| directed || from <= to)
                .map(move |(to, weight)| Edge { from, to, weight })
        })
    }

    /// Calls `visit` for every vertex.
    pub fn for_each_node(&self, mut visit: impl FnMut(VertexId)) {
        self.vertices().for_each(&mut visit);
    }

    /// Calls `visit(from, to, weight)` for every logical edge.
    pub fn for_each_edge(&self, mut visit: impl FnMut(VertexId, VertexId, Weight)) {
        for edge in self.edges() {
            visit(edge.from, edge.to, edge.weight);
        }
    }

    /// Calls `visit(vertex, to, weight)` for every outgoing arc of `vertex`.
    pub fn for_each_neighbor(
        &self,
        vertex: VertexId,
        mut visit: impl FnMut(VertexId, VertexId, Weight),
    ) {
        for (to, weight) in self.neighbors(vertex) {
            visit(vertex, to, weight);
        }
    }

    /// Returns the number of outgoing arcs of `vertex`.
    #[must_use]
    pub fn out_degree(&self, vertex: VertexId) -> usize {
        if !self.contains_vertex(vertex) {
            return 0;
        }
        with_storage!(&self.storage, s => s.out_degree(vertex))
    }

    /// Returns the in-degree of every vertex, indexed by vertex.
    ///
    /// For undirected graphs this equals the out-degree.
    #[must_use]
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.vertex_count()];
        for from in self.vertices() {
            for (to, _) in self.neighbors(from) {
                degrees[to.index()] += 1;
            }
        }
        degrees
    }

    /// Returns the first edge with a negative weight, if any.
    #[must_use]
    pub fn negative_edge(&self) -> Option<Edge> {
        self.edges().find(|edge| edge.weight < 0)
    }

    /// Picks a vertex uniformly at random, or `None` if the graph is empty.
    pub fn random_vertex<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<VertexId> {
        match self.vertex_count() {
            0 => None,
            count => Some(VertexId::new(rng.gen_range(0..count))),
        }
    }

    /// Connects every unconnected pair of distinct vertices with `probability`, weight 1.
    ///
    /// Returns the number of edges added. See
    /// [`generate_random_weighted_edges`](Graph::generate_random_weighted_edges).
    pub fn generate_random_edges<R: Rng + ?Sized>(&mut self, probability: f64, rng: &mut R) -> usize {
        self.generate_random_weighted_edges(probability, DEFAULT_WEIGHT..=DEFAULT_WEIGHT, rng)
    }

    /// Connects every unconnected pair of distinct vertices with `probability`.
    ///
    /// Each unordered pair `{u, v}` with no edge in either direction is considered
    /// exactly once. For directed graphs the orientation of a new edge is chosen
    /// uniformly at random. Weights are drawn uniformly from `weights`.
    ///
    /// This visits all `V * (V - 1) / 2` pairs, so it is O(V^2) and dominates the cost
    /// of building random graphs.
    pub fn generate_random_weighted_edges<R: Rng + ?Sized>(
        &mut self,
        probability: f64,
        weights: RangeInclusive<Weight>,
        rng: &mut R,
    ) -> usize {
        let probability = probability.clamp(0.0, 1.0);
        let count = self.vertex_count();
        let mut added = 0;

        for u in (0..count).map(VertexId::new) {
            for v in (u.index() + 1..count).map(VertexId::new) {
                if self.has_edge(u, v) || self.has_edge(v, u) {
                    continue;
                }
                if !rng.gen_bool(probability) {
                    continue;
                }
                let weight = rng.gen_range(weights.clone());
                if self.directed && rng.gen_bool(0.5) {
                    self.add_edge(v, u, weight);
                } else {
                    self.add_edge(u, v, weight);
                }
                added += 1;
            }
        }

        added
    }

    /// Returns a copy of this graph stored with a different encoding.
    ///
    /// Parallel edges collapse to a single edge when converting to a matrix.
    #[must_use]
    pub fn to_storage(&self, kind: StorageKind) -> Graph {
        let mut graph = Graph::with_vertices(self.vertex_count(), self.directed, kind);
        for edge in self.edges() {
            graph.add_edge(edge.from, edge.to, edge.weight);
        }
        graph
    }

    /// Removes every vertex and edge; directedness and encoding are kept.
    pub fn clear(&mut self) {
        with_storage!(&mut self.storage, s => s.clear());
        self.edge_count = 0;
    }
}
