//! Floyd-Warshall all-pairs shortest paths.
//!
//! The `V x V` matrix starts with 0 on the diagonal, the lightest direct arc weight
//! where one exists and `None` ("infinity") elsewhere. Every vertex `k` then serves once
//! as an intermediate, relaxing `dist[i][j]` through `dist[i][k] + dist[k][j]`. A
//! next-hop matrix is maintained alongside so individual paths can be recovered.
//! The pairs each intermediate improved are kept for replay.
//!
//! Time is O(V^3) and memory O(V^2) regardless of storage encoding.

use crate::{
    algorithms::{require_vertices, AlgorithmKind, GraphAlgorithm, Outcome, RevealUnit},
    graph::{Graph, VertexId, Weight},
    Precondition,
};

/// All-pairs shortest path matrix.
#[derive(Debug, Clone, Default)]
pub struct FloydWarshall {
    /// `distances[i][j]`, `None` if unreachable
    distances: Vec<Vec<Option<Weight>>>,
    /// `next[i][j]` is the vertex after `i` on a shortest `i -> j` path
    next: Vec<Vec<Option<VertexId>>>,
    /// `improved[k]` lists the `(i, j)` pairs shortened by going through `k`
    improved: Vec<Vec<(VertexId, VertexId)>>,
}

impl FloydWarshall {
    /// Creates an empty instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the distance matrix of the last run.
    #[must_use]
    pub fn distances(&self) -> &[Vec<Option<Weight>>] {
        &self.distances
    }

    /// Returns the shortest distance from `from` to `to`.
    #[must_use]
    pub fn distance(&self, from: VertexId, to: VertexId) -> Option<Weight> {
        self.distances.get(from.index())?.get(to.index()).copied().flatten()
    }

    /// Returns `true` if some vertex lies on a negative cycle.
    #[must_use]
    pub fn has_negative_cycle(&self) -> bool {
        self.distances
            .iter()
            .enumerate()
            .any(|(i, row)| row[i].is_some_and(|d| d < 0))
    }

    /// Reconstructs a shortest path from `from` to `to`.
    ///
    /// Returns `None` if `to` is unreachable, or if the walk does not terminate within
    /// `V` steps (a negative cycle on the way).
    #[must_use]
    pub fn path(&self, from: VertexId, to: VertexId) -> Option<Vec<VertexId>> {
        self.distance(from, to)?;

        let mut path = vec![from];
        let mut current = from;
        while current != to {
            current = self.next[current.index()][to.index()]?;
            path.push(current);
            if path.len() > self.distances.len() {
                return None;
            }
        }
        Some(path)
    }
}

impl GraphAlgorithm for FloydWarshall {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::FloydWarshall
    }

    fn check(&self, graph: &Graph) -> std::result::Result<(), Precondition> {
        require_vertices(graph)
    }

    fn execute(&mut self, graph: &Graph) {
        let n = graph.vertex_count();
        let mut dist = vec![vec![None; n]; n];
        let mut next = vec![vec![None; n]; n];

        for i in 0..n {
            dist[i][i] = Some(0);
            next[i][i] = Some(VertexId::new(i));
        }
        for from in graph.vertices() {
            for (to, weight) in graph.neighbors(from) {
                let cell: &mut Option<Weight> = &mut dist[from.index()][to.index()];
                if cell.map_or(true, |current| weight < current) {
                    *cell = Some(weight);
                    next[from.index()][to.index()] = Some(to);
                }
            }
        }

        let mut improved = vec![Vec::new(); n];
        for k in 0..n {
            for i in 0..n {
                let Some(through) = dist[i][k] else {
                    continue;
                };
                for j in 0..n {
                    let Some(rest) = dist[k][j] else {
                        continue;
                    };
                    let candidate = through.saturating_add(rest);
                    if dist[i][j].map_or(true, |current| candidate < current) {
                        dist[i][j] = Some(candidate);
                        next[i][j] = next[i][k];
                        improved[k].push((VertexId::new(i), VertexId::new(j)));
                    }
                }
            }
        }

        self.distances = dist;
        self.next = next;
        self.improved = improved;
    }

    fn clear(&mut self) {
        self.distances.clear();
        self.next.clear();
        self.improved.clear();
    }

    fn outcome(&self) -> Outcome {
        if self.distances.is_empty() {
            return Outcome::Pending;
        }
        Outcome::AllPairs {
            distances: self.distances.clone(),
        }
    }

    /// One batch per intermediate vertex, in the order the relaxation used them,
    /// holding the vertex and the pairs it shortened.
    fn reveal_units(&self) -> Vec<RevealUnit> {
        self.improved
            .iter()
            .enumerate()
            .map(|(k, pairs)| RevealUnit::Batch {
                vertices: vec![VertexId::new(k)],
                edges: pairs.clone(),
            })
            .collect()
    }
}
