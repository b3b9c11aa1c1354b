//! Strongly Connected Components (SCC) using Tarjan's algorithm.
//!
//! A strongly connected component is a maximal set of vertices such that there is a
//! path from every vertex to every other vertex in the set.
//!
//! The DFS is driven by an explicit frame stack instead of recursion, so deep graphs
//! (long chains) cannot overflow the native stack. Each frame holds the vertex and
//! its live neighbor iterator, which is exactly the state a recursive call would keep.

use rustc_hash::FxHashSet;

use crate::{
    algorithms::{
        require_directed, require_vertices, AlgorithmKind, GraphAlgorithm, Outcome,
        Requirements, RevealUnit,
    },
    graph::{Graph, Neighbors, VertexId},
    utils::BitSet,
    Precondition,
};

/// Tarjan's strongly connected components.
///
/// Components are numbered in the order they close, which is a reverse topological
/// order of the condensation: if an edge leads from component `a` to component `b`,
/// then `b < a`.
///
/// # Examples
///
/// ```rust
/// use graphlab::algorithms::{GraphAlgorithm, Tarjan};
/// use graphlab::graph::{Graph, StorageKind};
///
/// let graph = Graph::from_edges(true, StorageKind::AdjacencyList, [(0, 1, 1), (1, 2, 1), (2, 0, 1), (3, 4, 1), (4, 3, 1)]);
/// let mut tarjan = Tarjan::new();
/// tarjan.run(&graph)?;
/// assert_eq!(tarjan.components().len(), 2);
/// # Ok::<(), graphlab::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tarjan {
    /// `labels[v]` is the component id of `v`
    labels: Vec<usize>,
    /// Members of each component, ascending
    components: Vec<Vec<VertexId>>,
    /// Arcs with both endpoints inside the same component, per component
    internal: Vec<Vec<(VertexId, VertexId)>>,
    /// Deduplicated `(from_component, to_component)` arcs, sorted
    condensation: Vec<(usize, usize)>,
}

/// Internal state for one run.
struct TarjanState<'g> {
    /// Discovery index for each vertex (None if not yet visited)
    index: Vec<Option<usize>>,
    /// Lowlink value for each vertex
    lowlink: Vec<usize>,
    /// Vertices currently on the component stack
    on_stack: BitSet,
    /// The component stack
    stack: Vec<VertexId>,
    /// DFS frames: vertex and its remaining neighbors
    frames: Vec<(VertexId, Neighbors<'g>)>,
    /// Next discovery index
    current_index: usize,
}

impl<'g> TarjanState<'g> {
    fn new(n: usize) -> Self {
        TarjanState {
            index: vec![None; n],
            lowlink: vec![0; n],
            on_stack: BitSet::new(n),
            stack: Vec::new(),
            frames: Vec::new(),
            current_index: 0,
        }
    }

    fn discover(&mut self, graph: &'g Graph, vertex: VertexId) {
        let i = vertex.index();
        self.index[i] = Some(self.current_index);
        self.lowlink[i] = self.current_index;
        self.current_index += 1;
        self.stack.push(vertex);
        self.on_stack.insert(i);
        self.frames.push((vertex, graph.neighbors(vertex)));
    }

    /// Runs the DFS from `root`, calling `emit` for each component as it closes.
    fn strongconnect(
        &mut self,
        graph: &'g Graph,
        root: VertexId,
        emit: &mut impl FnMut(Vec<VertexId>),
    ) {
        self.discover(graph, root);

        loop {
            let Some((vertex, next)) = self
                .frames
                .last_mut()
                .map(|(vertex, neighbors)| (*vertex, neighbors.next()))
            else {
                break;
            };
            let v = vertex.index();

            if let Some((successor, _)) = next {
                let w = successor.index();
                match self.index[w] {
                    None => self.discover(graph, successor),
                    Some(discovered) if self.on_stack.contains(w) => {
                        self.lowlink[v] = self.lowlink[v].min(discovered);
                    }
                    Some(_) => {}
                }
                continue;
            }

            // All successors done: return from the frame
            self.frames.pop();
            if Some(self.lowlink[v]) == self.index[v] {
                let mut component = Vec::new();
                while let Some(member) = self.stack.pop() {
                    self.on_stack.remove(member.index());
                    component.push(member);
                    if member == vertex {
                        break;
                    }
                }
                emit(component);
            }
            if let Some(&(parent, _)) = self.frames.last() {
                let p = parent.index();
                self.lowlink[p] = self.lowlink[p].min(self.lowlink[v]);
            }
        }
    }
}

impl Tarjan {
    /// Creates an empty instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the component members of the last run, in closing order.
    #[must_use]
    pub fn components(&self) -> &[Vec<VertexId>] {
        &self.components
    }

    /// Returns the component id of every vertex, indexed by vertex.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Returns the component id of `vertex`.
    #[must_use]
    pub fn component_of(&self, vertex: VertexId) -> Option<usize> {
        self.labels.get(vertex.index()).copied()
    }

    /// Returns the arcs of the condensation DAG between component ids.
    #[must_use]
    pub fn condensation(&self) -> &[(usize, usize)] {
        &self.condensation
    }
}

impl GraphAlgorithm for Tarjan {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Tarjan
    }

    fn check(&self, graph: &Graph) -> std::result::Result<(), Precondition> {
        require_vertices(graph)?;
        require_directed(graph, true)
    }

    fn execute(&mut self, graph: &Graph) {
        self.clear();
        let n = graph.vertex_count();
        let mut labels = vec![0; n];
        let mut components = Vec::new();
        let mut state = TarjanState::new(n);

        for root in graph.vertices() {
            if state.index[root.index()].is_none() {
                state.strongconnect(graph, root, &mut |mut component| {
                    for member in &component {
                        labels[member.index()] = components.len();
                    }
                    component.sort_unstable();
                    components.push(component);
                });
            }
        }

        let mut internal = vec![Vec::new(); components.len()];
        let mut condensation = FxHashSet::default();
        for edge in graph.edges() {
            let (from, to) = (labels[edge.from.index()], labels[edge.to.index()]);
            if from == to {
                internal[from].push((edge.from, edge.to));
            } else {
                condensation.insert((from, to));
            }
        }
        let mut condensation: Vec<(usize, usize)> = condensation.into_iter().collect();
        condensation.sort_unstable();

        self.labels = labels;
        self.components = components;
        self.internal = internal;
        self.condensation = condensation;
    }

    fn clear(&mut self) {
        self.labels.clear();
        self.components.clear();
        self.internal.clear();
        self.condensation.clear();
    }

    fn outcome(&self) -> Outcome {
        if self.components.is_empty() {
            return Outcome::Pending;
        }
        Outcome::Components {
            components: self.components.clone(),
        }
    }

    /// One batch per component: its members and the arcs inside it.
    fn reveal_units(&self) -> Vec<RevealUnit> {
        self.components
            .iter()
            .zip(&self.internal)
            .map(|(vertices, edges)| RevealUnit::Batch {
                vertices: vertices.clone(),
                edges: edges.clone(),
            })
            .collect()
    }

    fn requirements(&self) -> Requirements {
        Requirements {
            directed: Some(true),
            ..Requirements::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::graph::StorageKind;

    fn v(index: usize) -> VertexId {
        VertexId::new(index)
    }

    fn vs(indices: &[usize]) -> Vec<VertexId> {
        indices.iter().copied().map(v).collect()
    }

    #[test]
    fn test_two_disjoint_cycles() {
        for kind in StorageKind::iter() {
            let graph = Graph::from_edges(
                true,
                kind,
                [(0, 1, 1), (1, 2, 1), (2, 0, 1), (3, 4, 1), (4, 3, 1)],
            );
            let mut tarjan = Tarjan::new();
            tarjan.run(&graph).unwrap();

            assert_eq!(tarjan.components(), &[vs(&[0, 1, 2]), vs(&[3, 4])]);
            assert_eq!(tarjan.labels(), &[0, 0, 0, 1, 1]);
            assert!(tarjan.condensation().is_empty());
        }
    }

    #[test]
    fn test_dag_has_singleton_components() {
        let graph = Graph::from_edges(true, StorageKind::AdjacencyList, [(0, 1, 1), (1, 2, 1)]);
        let mut tarjan = Tarjan::new();
        tarjan.run(&graph).unwrap();

        assert_eq!(tarjan.components(), &[vs(&[2]), vs(&[1]), vs(&[0])]);
        assert_eq!(tarjan.condensation(), &[(1, 0), (2, 1)]);
    }

    #[test]
    fn test_condensation_between_cycles() {
        // {0, 1} -> {2, 3}
        let graph = Graph::from_edges(
            true,
            StorageKind::AdjacencyList,
            [(0, 1, 1), (1, 0, 1), (1, 2, 1), (2, 3, 1), (3, 2, 1), (0, 3, 1)],
        );
        let mut tarjan = Tarjan::new();
        tarjan.run(&graph).unwrap();

        let upstream = tarjan.component_of(v(0)).unwrap();
        let downstream = tarjan.component_of(v(3)).unwrap();
        assert_eq!(tarjan.components().len(), 2);
        assert_eq!(tarjan.condensation(), &[(upstream, downstream)]);
        assert!(downstream < upstream);
    }

    #[test]
    fn test_reveal_batches() {
        let graph = Graph::from_edges(
            true,
            StorageKind::AdjacencyList,
            [(0, 1, 1), (1, 0, 1), (1, 2, 1)],
        );
        let mut tarjan = Tarjan::new();
        tarjan.run(&graph).unwrap();

        assert_eq!(
            tarjan.reveal_units(),
            vec![
                RevealUnit::Batch {
                    vertices: vs(&[2]),
                    edges: vec![]
                },
                RevealUnit::Batch {
                    vertices: vs(&[0, 1]),
                    edges: vec![(v(0), v(1)), (v(1), v(0))]
                },
            ]
        );
    }

    #[test]
    fn test_long_cycle_does_not_recurse() {
        let n = 100_000;
        let graph = Graph::from_edges(
            true,
            StorageKind::AdjacencyList,
            (0..n).map(|i| (i, (i + 1) % n, 1)),
        );
        let mut tarjan = Tarjan::new();
        tarjan.run(&graph).unwrap();
        assert_eq!(tarjan.components().len(), 1);
        assert_eq!(tarjan.components()[0].len(), n);
    }

    #[test]
    fn test_requires_directed() {
        let graph = Graph::from_edges(false, StorageKind::AdjacencyList, [(0, 1, 1)]);
        assert_eq!(
            Tarjan::new().check(&graph),
            Err(Precondition::RequiresDirected)
        );
    }
}
