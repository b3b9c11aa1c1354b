//! Storage abstraction shared by the adjacency-list and adjacency-matrix encodings.
//!
//! A [`GraphStorage`] only knows about directed, weighted arcs. Mirroring arcs for
//! undirected graphs and keeping the logical edge count is the job of
//! [`Graph`](crate::graph::Graph), which layers those rules on top of either encoding.
//!
//! # Design Principles
//!
//! ## Iterator-Based Traversal
//!
//! Neighbor queries return iterators through a generic associated type so that each
//! encoding can hand out its natural iterator without boxing or allocating.
//!
//! ## Container Order
//!
//! Iteration order is the order of the underlying container: insertion order for the
//! adjacency list, ascending column index for the adjacency matrix. Callers must not
//! rely on the two encodings agreeing.

use crate::graph::VertexId;

/// Weight attached to every edge.
pub type Weight = i64;

/// Weight used when the caller does not care about weights.
pub const DEFAULT_WEIGHT: Weight = 1;

/// Directed, weighted arc storage over vertices `0..vertex_count()`.
///
/// # Required Methods
///
/// - [`vertex_count`](GraphStorage::vertex_count) / [`add_vertex`](GraphStorage::add_vertex)
/// - [`insert_arc`](GraphStorage::insert_arc) / [`remove_arcs`](GraphStorage::remove_arcs)
/// - [`arc_weight`](GraphStorage::arc_weight)
/// - [`neighbors`](GraphStorage::neighbors)
/// - [`clear`](GraphStorage::clear)
pub trait GraphStorage {
    /// Iterator over the outgoing arcs of one vertex, as `(target, weight)` pairs.
    type Neighbors<'a>: Iterator<Item = (VertexId, Weight)>
    where
        Self: 'a;

    /// Returns the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Appends an isolated vertex and returns its id.
    fn add_vertex(&mut self) -> VertexId;

    /// Grows the vertex set until it holds at least `count` vertices.
    fn ensure_vertices(&mut self, count: usize) {
        while self.vertex_count() < count {
            self.add_vertex();
        }
    }

    /// Inserts the arc `from -> to`.
    ///
    /// Returns `true` when a new arc was created and `false` when an existing arc
    /// had its weight replaced (only possible for encodings without parallel arcs).
    /// Both endpoints must already exist.
    fn insert_arc(&mut self, from: VertexId, to: VertexId, weight: Weight) -> bool;

    /// Removes every arc `from -> to` and returns how many were removed.
    fn remove_arcs(&mut self, from: VertexId, to: VertexId) -> usize;

    /// Returns the weight of the first arc `from -> to`, if any.
    fn arc_weight(&self, from: VertexId, to: VertexId) -> Option<Weight>;

    /// Returns the outgoing arcs of `vertex`.
    ///
    /// # Panics
    ///
    /// May panic if `vertex` is not a valid vertex.
    fn neighbors(&self, vertex: VertexId) -> Self::Neighbors<'_>;

    /// Returns the number of outgoing arcs of `vertex`.
    fn out_degree(&self, vertex: VertexId) -> usize {
        self.neighbors(vertex).count()
    }

    /// Removes all vertices and arcs.
    fn clear(&mut self);
}
