//! Single-source shortest path bookkeeping shared by Dijkstra and Bellman-Ford.

use crate::graph::{VertexId, Weight};

/// Tentative distances and predecessor links from one source vertex.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortestPathTree {
    /// `distances[v]` is the best known distance to `v`, `None` while unreached
    distances: Vec<Option<Weight>>,
    /// `parents[v]` is the predecessor of `v` on its best known path
    parents: Vec<Option<VertexId>>,
    /// The source vertex
    source: Option<VertexId>,
}

impl ShortestPathTree {
    /// Creates a tree over `vertices` vertices where only `source` is reached (at 0).
    #[must_use]
    pub fn new(vertices: usize, source: VertexId) -> Self {
        let mut distances = vec![None; vertices];
        if let Some(slot) = distances.get_mut(source.index()) {
            *slot = Some(0);
        }
        ShortestPathTree {
            distances,
            parents: vec![None; vertices],
            source: Some(source),
        }
    }

    /// Returns the best known distance to `vertex`.
    #[must_use]
    pub fn distance(&self, vertex: VertexId) -> Option<Weight> {
        self.distances.get(vertex.index()).copied().flatten()
    }

    /// Returns all distances, indexed by vertex.
    #[must_use]
    pub fn distances(&self) -> &[Option<Weight>] {
        &self.distances
    }

    /// Returns the predecessor of `vertex` on its best known path.
    #[must_use]
    pub fn parent(&self, vertex: VertexId) -> Option<VertexId> {
        self.parents.get(vertex.index()).copied().flatten()
    }

    /// Lowers the distance of `to` to `distance` via `from` if that is an improvement.
    ///
    /// Returns `true` if the tree changed.
    pub fn relax(&mut self, from: VertexId, to: VertexId, distance: Weight) -> bool {
        let improves = self.distance(to).map_or(true, |current| distance < current);
        if improves {
            self.distances[to.index()] = Some(distance);
            self.parents[to.index()] = Some(from);
        }
        improves
    }

    /// Returns the vertices on the best known path from the source to `target`.
    ///
    /// `None` if `target` is unreached. Following parent links is bounded by the vertex
    /// count, so a parent cycle left behind by a negative cycle also yields `None`.
    #[must_use]
    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        let source = self.source?;
        self.distance(target)?;

        let mut path = vec![target];
        let mut current = target;
        while current != source {
            current = self.parent(current)?;
            path.push(current);
            if path.len() > self.distances.len() {
                return None;
            }
        }
        path.reverse();
        Some(path)
    }

    /// Returns the `(parent, child)` tree edges for `order`, skipping vertices without a parent.
    pub fn tree_edges<'a>(
        &'a self,
        order: &'a [VertexId],
    ) -> impl Iterator<Item = (VertexId, VertexId)> + 'a {
        order
            .iter()
            .filter_map(move |&vertex| self.parent(vertex).map(|parent| (parent, vertex)))
    }
}
