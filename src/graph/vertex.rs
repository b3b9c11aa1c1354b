//! Vertex identifier for graphs.
//!
//! This module provides the [`VertexId`] type, a strongly-typed identifier for vertices
//! within a [`Graph`](crate::graph::Graph). Vertices are always labeled `0..N-1`, so the
//! identifier doubles as an index into per-vertex scratch tables kept by algorithms.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A strongly-typed identifier for vertices within a graph.
///
/// `VertexId` wraps a `usize` index, providing type safety to prevent accidental
/// mixing of vertex indices with weights, distances or other integer values.
/// Vertex ids are assigned sequentially starting from 0 when vertices are added.
///
/// Because the wrapped value is unsigned, the "negative vertex" inputs that other
/// graph front ends have to reject at runtime cannot be expressed at all.
///
/// # Examples
///
/// ```rust
/// use graphlab::graph::{Graph, VertexId};
///
/// let mut graph = Graph::undirected();
/// let a = graph.add_node();
/// let b = graph.add_node();
///
/// assert_eq!(a, VertexId::new(0));
/// assert_eq!(b.index(), 1);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    /// Creates a new `VertexId` from a raw index value.
    ///
    /// # Arguments
    ///
    /// * `index` - The raw vertex index (0-based)
    #[must_use]
    #[inline]
    pub const fn new(index: usize) -> Self {
        VertexId(index)
    }

    /// Returns the raw index value of this vertex identifier.
    ///
    /// The index can be used to address vectors that store per-vertex data.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VertexId({})", self.0)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for VertexId {
    #[inline]
    fn from(index: usize) -> Self {
        VertexId(index)
    }
}

impl From<VertexId> for usize {
    #[inline]
    fn from(vertex: VertexId) -> Self {
        vertex.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_vertex_id_ordering() {
        let mut vertices = vec![VertexId::new(3), VertexId::new(1), VertexId::new(2)];
        vertices.sort();
        assert_eq!(
            vertices,
            vec![VertexId::new(1), VertexId::new(2), VertexId::new(3)]
        );
    }

    #[test]
    fn test_vertex_id_hash() {
        let mut set = HashSet::new();
        set.insert(VertexId::new(1));
        set.insert(VertexId::new(2));
        set.insert(VertexId::new(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_vertex_id_conversions() {
        let vertex: VertexId = 123usize.into();
        assert_eq!(vertex.index(), 123);
        let raw: usize = vertex.into();
        assert_eq!(raw, 123);
    }

    #[test]
    fn test_vertex_id_formatting() {
        let vertex = VertexId::new(42);
        assert_eq!(format!("{vertex:?}"), "VertexId(42)");
        assert_eq!(format!("{vertex}"), "42");
    }

    #[test]
    fn test_vertex_id_serializes_as_number() {
        let json = serde_json::to_string(&VertexId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: VertexId = serde_json::from_str("7").unwrap();
        assert_eq!(back, VertexId::new(7));
    }
}
