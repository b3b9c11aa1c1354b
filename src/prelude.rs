//! # graphlab Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the graphlab library. Import this module to get quick access to graphs, the
//! algorithm family, and the benchmark tooling.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all graphlab operations
pub use crate::Error;

/// Structural requirement an algorithm found unmet
pub use crate::Precondition;

/// The result type used throughout graphlab
pub use crate::Result;

// ================================================================================================
// Graph Model
// ================================================================================================

/// Graphs, their encodings and identifiers
pub use crate::graph::{Edge, Graph, StorageKind, VertexId, VisitedEdges, Weight};

// ================================================================================================
// Algorithms
// ================================================================================================

/// The shared algorithm interface and its results
pub use crate::algorithms::{
    AlgorithmKind, AlgorithmRegistry, GraphAlgorithm, Outcome, Requirements, RevealUnit,
    SettingValue,
};

/// Concrete algorithms
pub use crate::algorithms::{
    BellmanFord, Bfs, Dfs, Dijkstra, Euler, FloydWarshall, Prim, QueueStrategy, RecursiveDfs,
    SortStrategy, Tarjan, TopologicalSort, Tsp, TspMemo,
};

// ================================================================================================
// Visualization and Benchmarking
// ================================================================================================

/// Step-by-step replay of reveal units
pub use crate::visualizer::{ReplayConfig, Visualizer};

/// Complexity measurement
pub use crate::benchmark::{
    BenchmarkConfig, BenchmarkRunner, BenchmarkWorker, Complexity, SampleSeries, SpikeFilter,
};

/// Saved vertex positions
pub use crate::persistence::{Layout, Position};

/// Cooperative cancellation
pub use crate::utils::StopFlag;
