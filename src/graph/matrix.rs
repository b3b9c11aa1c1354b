//! Adjacency-matrix encoding.
//!
//! The matrix is a flat row-major `n * n` table of optional weights where `None` is the
//! "no edge" sentinel. Arc lookup is O(1) and neighbor enumeration scans a full row,
//! so it is O(V) per vertex. Appending a vertex reallocates the table and copies every
//! row, which makes growth O(V) per vertex (O(V^2) memory traffic in total).
//!
//! The matrix cannot hold parallel arcs: inserting an arc that already exists replaces
//! its weight.

use std::{iter::Enumerate, slice::Iter};

use crate::graph::{
    storage::{GraphStorage, Weight},
    VertexId,
};

/// Square mapping from `(from, to)` to an optional weight.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyMatrix {
    /// Row-major cells, `cells[from * size + to]`
    cells: Vec<Option<Weight>>,
    /// Number of vertices (side length of the matrix)
    size: usize,
}

impl AdjacencyMatrix {
    /// Creates a matrix with `vertices` isolated vertices.
    #[must_use]
    pub fn with_vertices(vertices: usize) -> Self {
        AdjacencyMatrix {
            cells: vec![None; vertices * vertices],
            size: vertices,
        }
    }

    #[inline]
    fn cell(&self, from: VertexId, to: VertexId) -> usize {
        from.index() * self.size + to.index()
    }

    /// Rebuilds the table with side length `size`, copying every existing row.
    fn resize(&mut self, size: usize) {
        let mut cells = vec![None; size * size];
        for row in 0..self.size {
            let old = &self.cells[row * self.size..(row + 1) * self.size];
            cells[row * size..row * size + self.size].copy_from_slice(old);
        }
        self.cells = cells;
        self.size = size;
    }
}

/// Outgoing arcs of one vertex in an [`AdjacencyMatrix`], in ascending column order.
pub struct MatrixNeighbors<'a> {
    row: Enumerate<Iter<'a, Option<Weight>>>,
}

impl Iterator for MatrixNeighbors<'_> {
    type Item = (VertexId, Weight);

    fn next(&mut self) -> Option<Self::Item> {
        for (column, cell) in self.row.by_ref() {
            if let Some(weight) = *cell {
                return Some((VertexId::new(column), weight));
            }
        }
        None
    }
}

impl GraphStorage for AdjacencyMatrix {
    type Neighbors<'a> = MatrixNeighbors<'a>;

    fn vertex_count(&self) -> usize {
        self.size
    }

    fn add_vertex(&mut self) -> VertexId {
        let id = VertexId::new(self.size);
        self.resize(self.size + 1);
        id
    }

    fn ensure_vertices(&mut self, count: usize) {
        if self.size < count {
            self.resize(count);
        }
    }

    fn insert_arc(&mut self, from: VertexId, to: VertexId, weight: Weight) -> bool {
        let cell = self.cell(from, to);
        self.cells[cell].replace(weight).is_none()
    }

    fn remove_arcs(&mut self, from: VertexId, to: VertexId) -> usize {
        if from.index() >= self.size || to.index() >= self.size {
            return 0;
        }
        let cell = self.cell(from, to);
        usize::from(self.cells[cell].take().is_some())
    }

    fn arc_weight(&self, from: VertexId, to: VertexId) -> Option<Weight> {
        if from.index() >= self.size || to.index() >= self.size {
            return None;
        }
        self.cells[self.cell(from, to)]
    }

    fn neighbors(&self, vertex: VertexId) -> Self::Neighbors<'_> {
        let start = vertex.index() * self.size;
        MatrixNeighbors {
            row: self.cells[start..start + self.size].iter().enumerate(),
        }
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.size = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(index: usize) -> VertexId {
        VertexId::new(index)
    }

    #[test]
    fn test_matrix_growth_preserves_arcs() {
        let mut matrix = AdjacencyMatrix::with_vertices(2);
        matrix.insert_arc(v(0), v(1), 4);
        matrix.insert_arc(v(1), v(0), 6);

        assert_eq!(matrix.add_vertex(), v(2));
        matrix.insert_arc(v(2), v(0), 9);

        assert_eq!(matrix.vertex_count(), 3);
        assert_eq!(matrix.arc_weight(v(0), v(1)), Some(4));
        assert_eq!(matrix.arc_weight(v(1), v(0)), Some(6));
        assert_eq!(matrix.arc_weight(v(2), v(0)), Some(9));
        assert_eq!(matrix.arc_weight(v(0), v(2)), None);
    }

    #[test]
    fn test_matrix_overwrites_instead_of_duplicating() {
        let mut matrix = AdjacencyMatrix::with_vertices(2);
        assert!(matrix.insert_arc(v(0), v(1), 1));
        assert!(!matrix.insert_arc(v(0), v(1), 3));
        assert_eq!(matrix.arc_weight(v(0), v(1)), Some(3));
        assert_eq!(matrix.out_degree(v(0)), 1);
    }

    #[test]
    fn test_matrix_neighbors_row_major() {
        let mut matrix = AdjacencyMatrix::with_vertices(4);
        matrix.insert_arc(v(1), v(3), 1);
        matrix.insert_arc(v(1), v(0), 2);

        let neighbors: Vec<(VertexId, Weight)> = matrix.neighbors(v(1)).collect();
        assert_eq!(neighbors, vec![(v(0), 2), (v(3), 1)]);
    }

    #[test]
    fn test_matrix_remove() {
        let mut matrix = AdjacencyMatrix::with_vertices(2);
        matrix.insert_arc(v(0), v(1), 1);
        assert_eq!(matrix.remove_arcs(v(0), v(1)), 1);
        assert_eq!(matrix.remove_arcs(v(0), v(1)), 0);
        assert_eq!(matrix.remove_arcs(v(5), v(1)), 0);
    }

    #[test]
    fn test_matrix_clear() {
        let mut matrix = AdjacencyMatrix::with_vertices(3);
        matrix.clear();
        assert_eq!(matrix.vertex_count(), 0);
        assert_eq!(matrix.add_vertex(), v(0));
    }
}
