// Copyright 2025 the graphlab authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # graphlab
//!
//! A workbench for classic graph algorithms. `graphlab` provides a weighted graph model
//! with two interchangeable encodings, a family of algorithms behind one trait, a replay
//! engine that turns an algorithm's result into an ordered stream of visual reveal steps,
//! and a benchmark harness that measures how an algorithm's running time grows with the
//! graph.
//!
//! ## Features
//!
//! - **Two encodings** - Adjacency list or adjacency matrix, directed or undirected
//! - **Fifteen algorithms** - Traversals, shortest paths, orderings, components, tours,
//!   Eulerian trails and spanning trees behind [`algorithms::GraphAlgorithm`]
//! - **Named settings** - Start and end vertices, depth limits and the like, discoverable
//!   at runtime through a small schema
//! - **Replay** - A pausable, timer-driven step machine over an algorithm's reveal units
//! - **Benchmarks** - Grow-and-measure runs on a background thread with cooperative
//!   cancellation, JSON series and spike filtering
//!
//! ## Quick Start
//!
//! ### Using the Prelude
//!
//! ```rust
//! use graphlab::prelude::*;
//!
//! let graph = Graph::from_edges(false, StorageKind::AdjacencyList, [(0, 1, 4), (0, 2, 1), (2, 1, 2)]);
//!
//! let mut dijkstra = Dijkstra::new(QueueStrategy::Lazy).ending_at(VertexId::new(1));
//! dijkstra.run(&graph)?;
//!
//! match dijkstra.outcome() {
//!     Outcome::ShortestPaths { distances, path, .. } => {
//!         assert_eq!(distances[1], Some(3));
//!         assert_eq!(path, Some(vec![VertexId::new(0), VertexId::new(2), VertexId::new(1)]));
//!     }
//!     other => panic!("unexpected outcome {other:?}"),
//! }
//! # Ok::<(), graphlab::Error>(())
//! ```
//!
//! ### Choosing Algorithms at Runtime
//!
//! ```rust
//! use graphlab::prelude::*;
//!
//! let registry = AlgorithmRegistry::with_defaults();
//! let mut algorithm = registry.create_by_name("tarjan")?;
//!
//! let graph = Graph::from_edges(true, StorageKind::AdjacencyMatrix, [(0, 1, 1), (1, 0, 1), (1, 2, 1)]);
//! algorithm.run(&graph)?;
//! assert!(matches!(algorithm.outcome(), Outcome::Components { components } if components.len() == 2));
//! # Ok::<(), graphlab::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`]. An algorithm that cannot run on a graph
//! reports the reason as a [`Precondition`], which converts into [`Error::Precondition`].

pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use graphlab::prelude::*;
///
/// let graph = Graph::complete(4, false, StorageKind::AdjacencyList, 1);
/// let mut bfs = Bfs::new();
/// bfs.run(&graph)?;
/// assert_eq!(bfs.reveal_units().len(), 3);
/// # Ok::<(), graphlab::Error>(())
/// ```
pub mod prelude;

/// The graph model: vertices, weighted edges, and the list and matrix encodings.
pub mod graph;

/// The algorithm family and its shared interface.
///
/// Every algorithm implements [`algorithms::GraphAlgorithm`]: it validates a graph with
/// `check`, computes with `execute`, and exposes an [`algorithms::Outcome`] together with
/// the [`algorithms::RevealUnit`] sequence a visualizer replays.
pub mod algorithms;

/// Timed, pausable replay of reveal units.
pub mod visualizer;

/// Empirical complexity measurement.
pub mod benchmark;

/// Saved vertex layouts.
pub mod persistence;

/// Shared building blocks: bit sets, heaps, cancellation and atomic file writes.
pub mod utils;

/// `graphlab` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `graphlab` Error type
///
/// The main error type for all operations in this crate.
pub use error::Error;

/// Why an algorithm refused a graph
pub use error::Precondition;
