//! Insertion-ordered, duplicate-free record of undirected edges.
//!
//! [`VisitedEdges`] is what traversal algorithms produce: the edges they discovered, in
//! the order they discovered them. The same sequence later drives a replay, where a
//! cursor into it marks how many edges have been revealed so far.

use std::ops::Index;

use rustc_hash::FxHashSet;
use serde::{Serialize, Serializer};

use crate::graph::VertexId;

/// Ordered sequence of unordered vertex pairs with O(1) membership tests.
///
/// Every pair is normalized so that the lower vertex comes first; `(5, 2)` and
/// `(2, 5)` are the same edge and only the first insertion is kept.
///
/// # Examples
///
/// ```rust
/// use graphlab::graph::{VertexId, VisitedEdges};
///
/// let mut edges = VisitedEdges::new();
/// assert!(edges.insert(VertexId::new(2), VertexId::new(5)));
/// assert!(!edges.insert(VertexId::new(5), VertexId::new(2)));
/// assert_eq!(edges.len(), 1);
/// assert_eq!(edges[0], (VertexId::new(2), VertexId::new(5)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedEdges {
    /// Normalized pairs in insertion order
    order: Vec<(VertexId, VertexId)>,
    /// Membership index over `order`
    members: FxHashSet<(VertexId, VertexId)>,
}

impl VisitedEdges {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes a pair so that the lower vertex comes first.
    #[must_use]
    #[inline]
    pub fn normalize(u: VertexId, v: VertexId) -> (VertexId, VertexId) {
        if u <= v {
            (u, v)
        } else {
            (v, u)
        }
    }

    /// Records the edge `{u, v}`.
    ///
    /// Returns `true` if the edge was new, `false` if it was already recorded.
    pub fn insert(&mut self, u: VertexId, v: VertexId) -> bool {
        let pair = Self::normalize(u, v);
        if self.members.insert(pair) {
            self.order.push(pair);
            true
        } else {
            false
        }
    }

    /// Returns `true` if the edge `{u, v}` has been recorded.
    #[must_use]
    pub fn contains(&self, u: VertexId, v: VertexId) -> bool {
        self.members.contains(&Self::normalize(u, v))
    }

    /// Returns the number of recorded edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the edge recorded at `position`, if any.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<(VertexId, VertexId)> {
        self.order.get(position).copied()
    }

    /// Returns the recorded edges in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[(VertexId, VertexId)] {
        &self.order
    }

    /// Iterates over the recorded edges in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.order.iter().copied()
    }

    /// Forgets every recorded edge.
    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }
}

impl Index<usize> for VisitedEdges {
    type Output = (VertexId, VertexId);

    fn index(&self, position: usize) -> &Self::Output {
        &self.order[position]
    }
}

impl FromIterator<(VertexId, VertexId)> for VisitedEdges {
    fn from_iter<T: IntoIterator<Item = (VertexId, VertexId)>>(iter: T) -> Self {
        let mut edges = VisitedEdges::new();
        for (u, v) in iter {
            edges.insert(u, v);
        }
        edges
    }
}

impl Serialize for VisitedEdges {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.order.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(index: usize) -> VertexId {
        VertexId::new(index)
    }

    #[test]
    fn test_visited_edges_deduplicates_reversed_pair() {
        let mut edges = VisitedEdges::new();
        assert!(edges.insert(v(2), v(5)));
        assert!(!edges.insert(v(5), v(2)));
        assert_eq!(edges.len(), 1);
        assert_eq!(edges.get(0), Some((v(2), v(5))));
    }

    #[test]
    fn test_visited_edges_keeps_insertion_order() {
        let edges: VisitedEdges = [(v(3), v(1)), (v(0), v(2)), (v(1), v(3)), (v(4), v(0))]
            .into_iter()
            .collect();

        assert_eq!(
            edges.as_slice(),
            &[(v(1), v(3)), (v(0), v(2)), (v(0), v(4))]
        );
    }

    #[test]
    fn test_visited_edges_contains_either_direction() {
        let mut edges = VisitedEdges::new();
        edges.insert(v(7), v(1));
        assert!(edges.contains(v(1), v(7)));
        assert!(edges.contains(v(7), v(1)));
        assert!(!edges.contains(v(1), v(2)));
    }

    #[test]
    fn test_visited_edges_clear() {
        let mut edges = VisitedEdges::new();
        edges.insert(v(0), v(1));
        edges.clear();
        assert!(edges.is_empty());
        assert!(!edges.contains(v(0), v(1)));
        assert!(edges.insert(v(1), v(0)));
    }

    #[test]
    fn test_visited_edges_serialize() {
        let mut edges = VisitedEdges::new();
        edges.insert(v(3), v(1));
        assert_eq!(serde_json::to_string(&edges).unwrap(), "[[1,3]]");
    }
}
