//! Adjacency-list encoding.
//!
//! Each vertex owns a vector of `(target, weight)` entries in insertion order.
//! Appending a vertex is amortized O(1), looking up an arc is O(out-degree), and
//! parallel arcs are kept as separate entries.

use std::{iter::Copied, slice::Iter};

use crate::graph::{
    storage::{GraphStorage, Weight},
    VertexId,
};

/// Outgoing arcs of one vertex in an [`AdjacencyList`].
pub type ListNeighbors<'a> = Copied<Iter<'a, (VertexId, Weight)>>;

/// Ordered sequence of per-vertex neighbor lists.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyList {
    /// `adjacency[u]` holds the outgoing arcs of `u` in insertion order
    adjacency: Vec<Vec<(VertexId, Weight)>>,
}

impl AdjacencyList {
    /// Creates an adjacency list with `vertices` isolated vertices.
    #[must_use]
    pub fn with_vertices(vertices: usize) -> Self {
        AdjacencyList {
            adjacency: vec![Vec::new(); vertices],
        }
    }
}

impl GraphStorage for AdjacencyList {
    type Neighbors<'a> = ListNeighbors<'a>;

    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn add_vertex(&mut self) -> VertexId {
        let id = VertexId::new(self.adjacency.len());
        self.adjacency.push(Vec::new());
        id
    }

    fn ensure_vertices(&mut self, count: usize) {
        if self.adjacency.len() < count {
            self.adjacency.resize_with(count, Vec::new);
        }
    }

    fn insert_arc(&mut self, from: VertexId, to: VertexId, weight: Weight) -> bool {
        debug_assert!(to.index() < self.adjacency.len());
        self.adjacency[from.index()].push((to, weight));
        true
    }

    fn remove_arcs(&mut self, from: VertexId, to: VertexId) -> usize {
        let Some(list) = self.adjacency.get_mut(from.index()) else {
            return 0;
        };
        let before = list.len();
        list.retain(|&(target, _)| target != to);
        before - list.len()
    }

    fn arc_weight(&self, from: VertexId, to: VertexId) -> Option<Weight> {
        self.adjacency
            .get(from.index())?
            .iter()
            .find(|&&(target, _)| target == to)
            .map(|&(_, weight)| weight)
    }

    fn neighbors(&self, vertex: VertexId) -> Self::Neighbors<'_> {
        self.adjacency[vertex.index()].iter().copied()
    }

    fn out_degree(&self, vertex: VertexId) -> usize {
        self.adjacency.get(vertex.index()).map_or(0, Vec::len)
    }

    fn clear(&mut self) {
        self.adjacency.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(index: usize) -> VertexId {
        VertexId::new(index)
    }

    #[test]
    fn test_list_add_vertex() {
        let mut list = AdjacencyList::default();
        assert_eq!(list.add_vertex(), v(0));
        assert_eq!(list.add_vertex(), v(1));
        assert_eq!(list.vertex_count(), 2);
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let mut list = AdjacencyList::with_vertices(4);
        list.insert_arc(v(0), v(3), 1);
        list.insert_arc(v(0), v(1), 2);
        list.insert_arc(v(0), v(2), 3);

        let targets: Vec<VertexId> = list.neighbors(v(0)).map(|(to, _)| to).collect();
        assert_eq!(targets, vec![v(3), v(1), v(2)]);
    }

    #[test]
    fn test_list_parallel_arcs() {
        let mut list = AdjacencyList::with_vertices(2);
        assert!(list.insert_arc(v(0), v(1), 5));
        assert!(list.insert_arc(v(0), v(1), 7));
        assert_eq!(list.out_degree(v(0)), 2);
        assert_eq!(list.arc_weight(v(0), v(1)), Some(5));

        assert_eq!(list.remove_arcs(v(0), v(1)), 2);
        assert_eq!(list.arc_weight(v(0), v(1)), None);
    }

    #[test]
    fn test_list_remove_missing_is_noop() {
        let mut list = AdjacencyList::with_vertices(2);
        assert_eq!(list.remove_arcs(v(0), v(1)), 0);
        assert_eq!(list.remove_arcs(v(9), v(1)), 0);
    }

    #[test]
    fn test_list_ensure_vertices() {
        let mut list = AdjacencyList::default();
        list.ensure_vertices(5);
        assert_eq!(list.vertex_count(), 5);
        list.ensure_vertices(3);
        assert_eq!(list.vertex_count(), 5);
    }
}
