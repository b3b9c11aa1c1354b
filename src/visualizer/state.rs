//! What a replay has marked as visited so far.

use crate::{
    algorithms::RevealUnit,
    graph::{VertexId, VisitedEdges},
    utils::BitSet,
};

/// Visited vertices and edges accumulated from revealed units.
///
/// Revealing an edge marks both of its endpoints as well, so a front end can paint
/// straight from this state without consulting the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisualState {
    vertices: BitSet,
    edges: VisitedEdges,
}

impl VisualState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks everything `unit` reveals.
    pub fn apply(&mut self, unit: &RevealUnit) {
        match unit {
            RevealUnit::Edge { from, to } => self.mark_edge(*from, *to),
            RevealUnit::Vertex { vertex } => {
                self.vertices.insert(vertex.index());
            }
            RevealUnit::Batch { vertices, edges } => {
                for vertex in vertices {
                    self.vertices.insert(vertex.index());
                }
                for &(from, to) in edges {
                    self.mark_edge(from, to);
                }
            }
        }
    }

    fn mark_edge(&mut self, from: VertexId, to: VertexId) {
        self.vertices.insert(from.index());
        self.vertices.insert(to.index());
        self.edges.insert(from, to);
    }

    /// Returns `true` if `vertex` has been revealed.
    #[must_use]
    pub fn is_vertex_visited(&self, vertex: VertexId) -> bool {
        self.vertices.contains(vertex.index())
    }

    /// Returns `true` if the edge `{from, to}` has been revealed.
    #[must_use]
    pub fn is_edge_visited(&self, from: VertexId, to: VertexId) -> bool {
        self.edges.contains(from, to)
    }

    /// Returns the revealed vertices in ascending order.
    pub fn visited_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter().map(VertexId::new)
    }

    /// Returns the number of revealed vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.count()
    }

    /// Returns the revealed edges in reveal order.
    #[must_use]
    pub fn visited_edges(&self) -> &VisitedEdges {
        &self.edges
    }

    /// Forgets everything.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(index: usize) -> VertexId {
        VertexId::new(index)
    }

    #[test]
    fn test_edge_marks_endpoints() {
        let mut state = VisualState::new();
        state.apply(&RevealUnit::edge(v(3), v(1)));

        assert!(state.is_vertex_visited(v(1)));
        assert!(state.is_vertex_visited(v(3)));
        assert!(!state.is_vertex_visited(v(2)));
        assert!(state.is_edge_visited(v(1), v(3)));
        assert_eq!(state.visited_vertices().collect::<Vec<_>>(), vec![v(1), v(3)]);
    }

    #[test]
    fn test_batch_marks_everything_at_once() {
        let mut state = VisualState::new();
        state.apply(&RevealUnit::Batch {
            vertices: vec![v(0), v(1), v(2)],
            edges: vec![(v(0), v(1)), (v(1), v(2))],
        });
        state.apply(&RevealUnit::Vertex { vertex: v(7) });

        assert_eq!(state.vertex_count(), 4);
        assert_eq!(state.visited_edges().len(), 2);

        state.clear();
        assert_eq!(state.vertex_count(), 0);
        assert!(state.visited_edges().is_empty());
        assert!(!state.is_vertex_visited(v(7)));
    }
}
