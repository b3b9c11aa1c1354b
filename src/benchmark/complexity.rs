//! The catalog of x-axis functions for benchmark series.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// Maps an iteration to the x value its measured cost is plotted against.
///
/// The command-line names are `1`, `v`, `e`, `v+e` and `v2`; the
/// [`Display`](std::fmt::Display) form is the big-O notation.
///
/// # Examples
///
/// ```rust
/// use graphlab::benchmark::Complexity;
///
/// let complexity: Complexity = "v+e".parse()?;
/// assert_eq!(complexity.eval(3, 10, 25), 35.0);
/// assert_eq!(complexity.to_string(), "O(V+E)");
/// # Ok::<(), strum::ParseError>(())
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    EnumMessage,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Complexity {
    /// The iteration number itself
    #[strum(to_string = "O(1)", serialize = "1", serialize = "o1", message = "1")]
    #[serde(rename = "1")]
    Constant,
    /// The vertex count
    #[strum(to_string = "O(V)", serialize = "v", message = "v")]
    #[serde(rename = "v")]
    Vertices,
    /// The edge count
    #[strum(to_string = "O(E)", serialize = "e", message = "e")]
    #[serde(rename = "e")]
    Edges,
    /// Vertices plus edges
    #[default]
    #[strum(to_string = "O(V+E)", serialize = "v+e", serialize = "ve", message = "v+e")]
    #[serde(rename = "v+e")]
    VerticesPlusEdges,
    /// The vertex count squared
    #[strum(to_string = "O(V²)", serialize = "v2", serialize = "v^2", message = "v2")]
    #[serde(rename = "v2")]
    VerticesSquared,
}

impl Complexity {
    /// Evaluates the function for iteration `i` on a graph with `vertices` and `edges`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn eval(self, i: usize, vertices: usize, edges: usize) -> f64 {
        let (i, v, e) = (i as f64, vertices as f64, edges as f64);
        match self {
            Complexity::Constant => i,
            Complexity::Vertices => v,
            Complexity::Edges => e,
            Complexity::VerticesPlusEdges => v + e,
            Complexity::VerticesSquared => v * v,
        }
    }

    /// Returns the short name accepted by [`FromStr`](std::str::FromStr).
    #[must_use]
    pub fn short_name(self) -> &'static str {
        self.get_message().unwrap_or("v+e")
    }
}
