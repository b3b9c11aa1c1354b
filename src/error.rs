use thiserror::Error;

use crate::graph::VertexId;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// # Error Categories
///
/// ## Algorithm Errors
/// - [`Error::Precondition`] - The graph does not have the shape an algorithm requires
///
/// ## Configuration Errors
/// - [`Error::UnknownSetting`] - An algorithm has no setting with the given name
/// - [`Error::SettingType`] - A setting was assigned a value of the wrong kind
/// - [`Error::UnknownAlgorithm`] - No constructor is registered for the requested algorithm
///
/// ## Benchmark Errors
/// - [`Error::BenchmarkRunning`] - A second run was started while one is in flight
/// - [`Error::BenchmarkAborted`] - The run ended before producing a report
/// - [`Error::WorkerPanicked`] - The background worker thread died
///
/// ## I/O and External Errors
/// - [`Error::Io`] - Filesystem I/O errors
/// - [`Error::Json`] - Malformed or unwritable JSON documents
/// - [`Error::Persistence`] - Documents that parse but do not have the expected layout
#[derive(Error, Debug)]
pub enum Error {
    /// The graph does not satisfy an algorithm's structural requirements.
    ///
    /// Returned by [`GraphAlgorithm::run`](crate::algorithms::GraphAlgorithm::run) when
    /// the check fails; the algorithm is not executed.
    #[error(transparent)]
    Precondition(#[from] Precondition),

    /// The algorithm declares no setting with this name.
    #[error("Unknown setting - {0}")]
    UnknownSetting(String),

    /// A setting was given a value of the wrong kind.
    #[error("Setting '{name}' expects a {expected} value")]
    SettingType {
        /// Setting name
        name: &'static str,
        /// Kind the setting accepts
        expected: &'static str,
    },

    /// The registry has no constructor for the requested algorithm name.
    #[error("No algorithm registered for '{0}'")]
    UnknownAlgorithm(String),

    /// A worker was asked to start while its previous run is still in flight.
    #[error("A benchmark run is already in progress")]
    BenchmarkRunning,

    /// The worker hung up before delivering its report.
    #[error("The benchmark run ended without a report")]
    BenchmarkAborted,

    /// The worker thread panicked; the algorithm it owned is lost.
    #[error("The benchmark worker thread panicked")]
    WorkerPanicked,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors raised while saving or loading documents.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A JSON document could not be parsed or written.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// A JSON document parsed but does not have the expected shape.
    #[error("Persistence - {0}")]
    Persistence(String),
}

/// A structural requirement of an algorithm that the graph does not meet.
///
/// The [`Display`](std::fmt::Display) text is the human-readable reason shown to
/// the user when an algorithm refuses to run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
    /// The graph has no vertices.
    #[error("The graph has no vertices")]
    EmptyGraph,

    /// A start or end vertex lies outside the graph.
    #[error("Vertex {vertex} is out of range, the graph has {count} vertices")]
    InvalidVertex {
        /// The offending vertex
        vertex: VertexId,
        /// Number of vertices in the graph
        count: usize,
    },

    /// The algorithm only runs on directed graphs.
    #[error("This algorithm requires a directed graph")]
    RequiresDirected,

    /// The algorithm only runs on undirected graphs.
    #[error("This algorithm requires an undirected graph")]
    RequiresUndirected,

    /// An edge carries a negative weight.
    #[error("Edge {from} -> {to} has negative weight {weight}")]
    NegativeWeight {
        /// Source vertex
        from: VertexId,
        /// Target vertex
        to: VertexId,
        /// The negative weight
        weight: i64,
    },

    /// The graph contains a directed cycle.
    #[error("The graph contains a cycle")]
    CycleDetected,

    /// The input is larger than the algorithm can represent or afford.
    #[error("The graph has {count} vertices, at most {limit} are supported")]
    TooManyVertices {
        /// Vertices in the graph
        count: usize,
        /// Largest supported vertex count
        limit: usize,
    },

    /// The degree parity rule rules out an Eulerian path.
    #[error("No Eulerian path exists ({odd} vertices with unbalanced degree)")]
    NoEulerianPath {
        /// Number of vertices whose degree breaks the parity rule
        odd: usize,
    },

    /// The vertices that carry edges do not form one connected piece.
    #[error("The edges of the graph are not connected")]
    Disconnected,
}
