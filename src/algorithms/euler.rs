//! Eulerian paths and circuits.
//!
//! Existence follows the degree parity rule:
//!
//! - Undirected: zero odd-degree vertices gives a circuit, exactly two gives a path
//!   between them.
//! - Directed: every vertex balanced (`out == in`) gives a circuit; exactly one vertex
//!   with `out - in == 1` and one with `in - out == 1` gives a path from the first to
//!   the second.
//!
//! Parity is necessary but not sufficient, so the check also requires every vertex
//! that carries an edge to sit in one (weakly) connected piece.
//!
//! The trail is built with Hierholzer's algorithm on an explicit stack. Each logical
//! edge gets an id shared by both of its stored arcs, and a used-edge set over those
//! ids guarantees that an undirected edge is consumed once no matter which direction
//! reaches it first. Parallel edges have distinct ids and are each consumed once.

use std::collections::VecDeque;

use crate::{
    algorithms::{require_vertices, AlgorithmKind, GraphAlgorithm, Outcome, RevealUnit},
    graph::{Graph, VertexId},
    utils::BitSet,
    Precondition,
};

/// Result of the degree parity rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    /// Every vertex is balanced; a closed trail may exist
    Circuit,
    /// An open trail may exist between these two vertices
    Path {
        /// Where the trail must start
        start: VertexId,
        /// Where the trail must end
        end: VertexId,
    },
    /// No Eulerian trail exists
    None {
        /// Number of vertices breaking the rule
        odd: usize,
    },
}

/// Classifies `graph` by the degree parity rule.
///
/// Self-loops count twice towards an undirected degree.
///
/// # Examples
///
/// ```rust
/// use graphlab::algorithms::{degree_parity, Parity};
/// use graphlab::graph::{Graph, StorageKind, VertexId};
///
/// let graph = Graph::from_edges(false, StorageKind::AdjacencyList, [(0, 1, 1), (1, 2, 1)]);
/// assert_eq!(
///     degree_parity(&graph),
///     Parity::Path { start: VertexId::new(0), end: VertexId::new(2) }
/// );
/// ```
#[must_use]
pub fn degree_parity(graph: &Graph) -> Parity {
    if graph.is_directed() {
        let in_degrees = graph.in_degrees();
        let mut starts = Vec::new();
        let mut ends = Vec::new();
        let mut unbalanced = 0;

        for vertex in graph.vertices() {
            let out = graph.out_degree(vertex);
            let inn = in_degrees[vertex.index()];
            if out == inn {
                continue;
            }
            unbalanced += 1;
            if out == inn + 1 {
                starts.push(vertex);
            } else if inn == out + 1 {
                ends.push(vertex);
            }
        }

        match (unbalanced, starts.as_slice(), ends.as_slice()) {
            (0, _, _) => Parity::Circuit,
            (2, &[start], &[end]) => Parity::Path { start, end },
            (odd, _, _) => Parity::None { odd },
        }
    } else {
        let odd: Vec<VertexId> = graph
            .vertices()
            .filter(|&vertex| undirected_degree(graph, vertex) % 2 == 1)
            .collect();

        match odd.as_slice() {
            [] => Parity::Circuit,
            &[start, end] => Parity::Path { start, end },
            _ => Parity::None { odd: odd.len() },
        }
    }
}

fn undirected_degree(graph: &Graph, vertex: VertexId) -> usize {
    graph
        .neighbors(vertex)
        .map(|(to, _)| if to == vertex { 2 } else { 1 })
        .sum()
}

/// Returns `true` if all vertices with at least one edge are weakly connected.
fn edges_connected(graph: &Graph) -> bool {
    let n = graph.vertex_count();
    let mut adjacency = vec![Vec::new(); n];
    for edge in graph.edges() {
        adjacency[edge.from.index()].push(edge.to.index());
        adjacency[edge.to.index()].push(edge.from.index());
    }

    let Some(root) = (0..n).find(|&v| !adjacency[v].is_empty()) else {
        return true;
    };

    let mut seen = BitSet::new(n);
    let mut queue = VecDeque::from([root]);
    seen.insert(root);
    while let Some(v) = queue.pop_front() {
        for &w in &adjacency[v] {
            if seen.insert(w) {
                queue.push_back(w);
            }
        }
    }

    (0..n).all(|v| adjacency[v].is_empty() || seen.contains(v))
}

/// Hierholzer's Eulerian trail.
#[derive(Debug, Clone, Default)]
pub struct Euler {
    trail: Vec<VertexId>,
    executed: bool,
}

impl Euler {
    /// Creates an empty instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the vertex sequence of the last trail.
    ///
    /// Empty when the graph has no edges.
    #[must_use]
    pub fn trail(&self) -> &[VertexId] {
        &self.trail
    }
}

impl GraphAlgorithm for Euler {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Euler
    }

    fn check(&self, graph: &Graph) -> std::result::Result<(), Precondition> {
        require_vertices(graph)?;
        if let Parity::None { odd } = degree_parity(graph) {
            return Err(Precondition::NoEulerianPath { odd });
        }
        if !edges_connected(graph) {
            return Err(Precondition::Disconnected);
        }
        Ok(())
    }

    fn execute(&mut self, graph: &Graph) {
        self.clear();
        self.executed = true;

        let start = match degree_parity(graph) {
            Parity::Path { start, .. } => start,
            Parity::Circuit => match graph.vertices().find(|&v| graph.out_degree(v) > 0) {
                Some(vertex) => vertex,
                None => return,
            },
            Parity::None { .. } => return,
        };

        // Arcs tagged with the id of their logical edge
        let mut adjacency: Vec<Vec<(VertexId, usize)>> = vec![Vec::new(); graph.vertex_count()];
        let mut edge_count = 0;
        for (id, edge) in graph.edges().enumerate() {
            adjacency[edge.from.index()].push((edge.to, id));
            if !graph.is_directed() && edge.from != edge.to {
                adjacency[edge.to.index()].push((edge.from, id));
            }
            edge_count += 1;
        }

        let mut used = BitSet::new(edge_count);
        let mut cursor = vec![0; graph.vertex_count()];
        let mut stack = vec![start];

        while let Some(&vertex) = stack.last() {
            let arcs = &adjacency[vertex.index()];
            let position = &mut cursor[vertex.index()];
            while *position < arcs.len() && used.contains(arcs[*position].1) {
                *position += 1;
            }

            if let Some(&(next, id)) = arcs.get(*position) {
                *position += 1;
                used.insert(id);
                stack.push(next);
            } else {
                self.trail.push(vertex);
                stack.pop();
            }
        }
        self.trail.reverse();
    }

    fn clear(&mut self) {
        self.trail.clear();
        self.executed = false;
    }

    fn outcome(&self) -> Outcome {
        if !self.executed {
            return Outcome::Pending;
        }
        Outcome::Trail {
            trail: self.trail.clone(),
        }
    }

    fn reveal_units(&self) -> Vec<RevealUnit> {
        RevealUnit::along(&self.trail)
    }
}
