//! The graph algorithm family.
//!
//! Every algorithm is an independent type implementing [`GraphAlgorithm`]. The trait is
//! the whole contract: a structural [`check`](GraphAlgorithm::check), a synchronous
//! [`execute`](GraphAlgorithm::execute), a typed [`Outcome`], and a replay script made of
//! [`RevealUnit`]s. Algorithms borrow the graph for the duration of `execute` only; the
//! scratch state they keep between runs is theirs and is reset by
//! [`clear`](GraphAlgorithm::clear).
//!
//! # Key Components
//!
//! - [`GraphAlgorithm`] - The capability every algorithm implements
//! - [`AlgorithmKind`] - Tag naming each algorithm variant
//! - [`AlgorithmRegistry`] - Explicit table from tag to constructor
//! - [`SettingSpec`] / [`SettingValue`] - Declared, typed algorithm settings
//! - [`Outcome`] - The result of a run, one variant per result family
//!
//! # Algorithms
//!
//! | Kind | Type | Result |
//! |------|------|--------|
//! | `bfs`, `dfs`, `recursive-dfs` | [`Bfs`], [`Dfs`], [`RecursiveDfs`] | discovery edges |
//! | `dijkstra-lazy`, `dijkstra-eager` | [`Dijkstra`] | distances and path |
//! | `bellman-ford` | [`BellmanFord`] | distances, path, negative cycle flag |
//! | `floyd-warshall` | [`FloydWarshall`] | distance matrix |
//! | `topological-kahn`, `topological-dfs` | [`TopologicalSort`] | linear order |
//! | `tarjan` | [`Tarjan`] | components |
//! | `tsp-hashed`, `tsp-bitmask` | [`Tsp`] | tour and cost |
//! | `euler` | [`Euler`] | vertex trail |
//! | `prim-lazy`, `prim-eager` | [`Prim`] | spanning tree edges |
//!
//! # Examples
//!
//! ```rust
//! use graphlab::algorithms::{Bfs, GraphAlgorithm};
//! use graphlab::graph::{Graph, StorageKind};
//!
//! let graph = Graph::from_edges(false, StorageKind::AdjacencyList, [(0, 1, 1), (1, 2, 1), (0, 3, 1)]);
//! let mut bfs = Bfs::new();
//!
//! bfs.run(&graph)?;
//! assert_eq!(bfs.edges().len(), 3);
//! # Ok::<(), graphlab::Error>(())
//! ```

mod bellman_ford;
mod dijkstra;
mod euler;
mod floyd_warshall;
mod mst;
mod paths;
mod registry;
mod scc;
pub mod schema;
mod topological;
mod traversal;
mod tsp;

use serde::Serialize;
use strum::{Display, EnumIter, EnumMessage, EnumString};

use crate::{
    graph::{Edge, Graph, VertexId, VisitedEdges, Weight},
    Error, Precondition, Result,
};

pub use bellman_ford::BellmanFord;
pub use dijkstra::{Dijkstra, QueueStrategy};
pub use euler::{degree_parity, Euler, Parity};
pub use floyd_warshall::FloydWarshall;
pub use mst::Prim;
pub use paths::ShortestPathTree;
pub use registry::{AlgorithmRegistry, Constructor};
pub use scc::Tarjan;
pub use schema::{SettingKind, SettingSpec, SettingValue};
pub use topological::{SortStrategy, TopologicalSort};
pub use traversal::{Bfs, Dfs, RecursiveDfs, DEFAULT_DEPTH_LIMIT};
pub use tsp::{Tsp, TspMemo, BITMASK_LIMIT, HASHED_LIMIT};

/// Tag naming one algorithm variant.
///
/// The kebab-case [`Display`](std::fmt::Display) form is the name used on the command
/// line and in the registry; [`title`](AlgorithmKind::title) is the human-readable form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, EnumMessage, Serialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    /// Breadth-first search
    #[strum(message = "Breadth-first search")]
    Bfs,
    /// Depth-first search with an explicit stack
    #[strum(message = "Depth-first search")]
    Dfs,
    /// Depth-first search by recursion, depth capped
    #[strum(message = "Depth-first search (recursive)")]
    RecursiveDfs,
    /// Dijkstra with a lazy priority queue
    #[strum(message = "Dijkstra (lazy)")]
    DijkstraLazy,
    /// Dijkstra with an indexed priority queue
    #[strum(message = "Dijkstra (eager)")]
    DijkstraEager,
    /// Bellman-Ford single-source shortest paths
    #[strum(message = "Bellman-Ford")]
    BellmanFord,
    /// Floyd-Warshall all-pairs shortest paths
    #[strum(message = "Floyd-Warshall")]
    FloydWarshall,
    /// Kahn's topological sort
    #[strum(message = "Topological sort (Kahn)")]
    TopologicalKahn,
    /// Topological sort by DFS finishing order
    #[strum(message = "Topological sort (DFS)")]
    TopologicalDfs,
    /// Tarjan's strongly connected components
    #[strum(message = "Tarjan's SCC")]
    Tarjan,
    /// Held-Karp TSP with hashed vertex-set keys
    #[strum(message = "TSP (hashed)")]
    TspHashed,
    /// Held-Karp TSP with bitmask keys
    #[strum(message = "TSP (bitmask)")]
    TspBitmask,
    /// Hierholzer's Eulerian path
    #[strum(message = "Eulerian path")]
    Euler,
    /// Prim's MST with a lazy priority queue
    #[strum(message = "Prim's MST (lazy)")]
    PrimLazy,
    /// Prim's MST with an indexed priority queue
    #[strum(message = "Prim's MST (eager)")]
    PrimEager,
}

impl AlgorithmKind {
    /// Returns the human-readable name.
    #[must_use]
    pub fn title(self) -> &'static str {
        self.get_message().unwrap_or("Graph algorithm")
    }
}

/// One atomically displayed step of a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "unit", rename_all = "kebab-case")]
pub enum RevealUnit {
    /// A single edge and its two endpoints
    Edge {
        /// First endpoint
        from: VertexId,
        /// Second endpoint
        to: VertexId,
    },
    /// A single vertex
    Vertex {
        /// The vertex
        vertex: VertexId,
    },
    /// A group revealed together (a whole tour, a whole component)
    Batch {
        /// Vertices in the group
        vertices: Vec<VertexId>,
        /// Edges in the group
        edges: Vec<(VertexId, VertexId)>,
    },
}

impl RevealUnit {
    /// Shorthand for [`RevealUnit::Edge`].
    #[must_use]
    pub fn edge(from: VertexId, to: VertexId) -> Self {
        RevealUnit::Edge { from, to }
    }

    /// Turns a vertex sequence into one edge unit per consecutive pair.
    #[must_use]
    pub fn along(path: &[VertexId]) -> Vec<Self> {
        path.windows(2)
            .map(|pair| RevealUnit::edge(pair[0], pair[1]))
            .collect()
    }
}

/// The result of one algorithm run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "kebab-case")]
pub enum Outcome {
    /// Nothing has been executed since construction or the last `clear`
    Pending,
    /// Edges discovered by a traversal, in discovery order
    Traversal {
        /// Discovery edges
        edges: VisitedEdges,
    },
    /// Single-source shortest paths
    ShortestPaths {
        /// Distance from the start vertex, `None` if unreachable
        distances: Vec<Option<Weight>>,
        /// Path to the end vertex, if one was requested and exists
        path: Option<Vec<VertexId>>,
        /// Whether a negative cycle made the distances unreliable
        negative_cycle: bool,
    },
    /// All-pairs shortest paths
    AllPairs {
        /// `distances[i][j]`, `None` if `j` is unreachable from `i`
        distances: Vec<Vec<Option<Weight>>>,
    },
    /// A linear vertex order
    Order {
        /// The vertices, in order
        order: Vec<VertexId>,
    },
    /// A partition of the vertices
    Components {
        /// Component members; component `i` is `components[i]`
        components: Vec<Vec<VertexId>>,
    },
    /// A Hamiltonian cycle
    Tour {
        /// Total tour weight, `None` if no tour exists
        cost: Option<Weight>,
        /// Closed vertex sequence starting and ending at vertex 0
        tour: Vec<VertexId>,
    },
    /// An edge-consuming walk
    Trail {
        /// Vertex sequence of the walk
        trail: Vec<VertexId>,
    },
    /// A spanning tree (or forest, for disconnected graphs)
    SpanningTree {
        /// Tree edges in the order they were added
        edges: Vec<Edge>,
        /// Sum of the tree edge weights
        total: Weight,
    },
}

/// Graph shapes an algorithm accepts, used to grow benchmark graphs it can run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Requirements {
    /// `Some(true)` for directed-only, `Some(false)` for undirected-only (default: `None`)
    pub directed: Option<bool>,
    /// Whether the graph must be free of directed cycles (default: `false`)
    pub acyclic: bool,
    /// Largest vertex count the algorithm accepts (default: unbounded)
    pub max_vertices: Option<usize>,
}

/// The capability shared by every graph algorithm.
///
/// Callers must call [`check`](GraphAlgorithm::check) and only
/// [`execute`](GraphAlgorithm::execute) when it passes; [`run`](GraphAlgorithm::run)
/// does both. Executing the same algorithm twice on the same graph, with a
/// [`clear`](GraphAlgorithm::clear) in between, produces the same [`Outcome`].
///
/// Implementations are `Send` so a benchmark worker can take ownership of one.
pub trait GraphAlgorithm: Send {
    /// Returns the tag of this algorithm.
    fn kind(&self) -> AlgorithmKind;

    /// Verifies that `graph` has the shape this algorithm needs.
    ///
    /// # Errors
    ///
    /// Returns the first unmet [`Precondition`].
    fn check(&self, graph: &Graph) -> std::result::Result<(), Precondition>;

    /// Runs the algorithm to completion over `graph`.
    ///
    /// Must only be called after [`check`](GraphAlgorithm::check) succeeded for the same
    /// graph. Scratch state from a previous run is discarded first.
    fn execute(&mut self, graph: &Graph);

    /// Drops the result and all scratch state; settings are kept.
    fn clear(&mut self);

    /// Returns the result of the last execution.
    fn outcome(&self) -> Outcome;

    /// Returns the replay script of the last execution, in reveal order.
    fn reveal_units(&self) -> Vec<RevealUnit>;

    /// Returns the shapes of graph this algorithm accepts.
    fn requirements(&self) -> Requirements {
        Requirements::default()
    }

    /// Returns the declared settings, in display order.
    fn settings(&self) -> &'static [SettingSpec] {
        &[]
    }

    /// Reads a setting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSetting`] if no setting has this name.
    fn get_setting(&self, name: &str) -> Result<SettingValue> {
        Err(Error::UnknownSetting(name.to_string()))
    }

    /// Writes a setting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSetting`] if no setting has this name and
    /// [`Error::SettingType`] if the value has the wrong kind.
    fn set_setting(&mut self, name: &str, _value: SettingValue) -> Result<()> {
        Err(Error::UnknownSetting(name.to_string()))
    }

    /// Returns a one-line description including the current settings.
    fn describe(&self) -> String {
        let settings: Vec<String> = self
            .settings()
            .iter()
            .filter_map(|spec| {
                self.get_setting(spec.name)
                    .ok()
                    .map(|value| format!("{}={value}", spec.name))
            })
            .collect();

        if settings.is_empty() {
            self.kind().title().to_string()
        } else {
            format!("{} [{}]", self.kind().title(), settings.join(", "))
        }
    }

    /// Checks `graph` and executes on success.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Precondition`] without executing if the check fails.
    fn run(&mut self, graph: &Graph) -> Result<()> {
        self.check(graph)?;
        log::debug!("Running {} on {} vertices", self.describe(), graph.vertex_count());
        self.execute(graph);
        Ok(())
    }
}

impl std::fmt::Debug for dyn GraphAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphAlgorithm")
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

/// Fails if the graph has no vertices.
pub(crate) fn require_vertices(graph: &Graph) -> std::result::Result<(), Precondition> {
    if graph.is_empty() {
        Err(Precondition::EmptyGraph)
    } else {
        Ok(())
    }
}

/// Fails if `vertex` is not a vertex of `graph`.
pub(crate) fn require_vertex(
    graph: &Graph,
    vertex: VertexId,
) -> std::result::Result<(), Precondition> {
    if graph.contains_vertex(vertex) {
        Ok(())
    } else {
        Err(Precondition::InvalidVertex {
            vertex,
            count: graph.vertex_count(),
        })
    }
}

/// Fails unless the graph is non-empty and contains `start`.
pub(crate) fn require_start(graph: &Graph, start: VertexId) -> std::result::Result<(), Precondition> {
    require_vertices(graph)?;
    require_vertex(graph, start)
}

/// Fails if the directedness of `graph` differs from `directed`.
pub(crate) fn require_directed(
    graph: &Graph,
    directed: bool,
) -> std::result::Result<(), Precondition> {
    match (directed, graph.is_directed()) {
        (true, false) => Err(Precondition::RequiresDirected),
        (false, true) => Err(Precondition::RequiresUndirected),
        _ => Ok(()),
    }
}

/// Fails on the first edge with a negative weight.
pub(crate) fn require_non_negative(graph: &Graph) -> std::result::Result<(), Precondition> {
    match graph.negative_edge() {
        Some(edge) => Err(Precondition::NegativeWeight {
            from: edge.from,
            to: edge.to,
            weight: edge.weight,
        }),
        None => Ok(()),
    }
}

/// Fails if `graph` has more than `limit` vertices.
pub(crate) fn require_at_most(graph: &Graph, limit: usize) -> std::result::Result<(), Precondition> {
    let count = graph.vertex_count();
    if count > limit {
        Err(Precondition::TooManyVertices { count, limit })
    } else {
        Ok(())
    }
}
