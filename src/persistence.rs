//! Saved vertex layouts.
//!
//! A layout records where each vertex is drawn. It is stored as a JSON object keyed by
//! the stringified vertex id:
//!
//! ```json
//! {"0": {"x": 120.0, "y": 80.0}, "1": {"x": 40.5, "y": 200.0}}
//! ```
//!
//! Only positions are stored. Edges live in the [`Graph`] and are not part of the
//! document.

use std::{collections::BTreeMap, f64::consts::TAU, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    graph::{Graph, VertexId},
    utils::write_atomically,
    Result,
};

/// A point in drawing coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

/// Vertex positions keyed by vertex id.
///
/// # Examples
///
/// ```rust
/// use graphlab::graph::VertexId;
/// use graphlab::persistence::{Layout, Position};
///
/// let mut layout = Layout::new();
/// layout.set(VertexId::new(1), Position { x: 3.0, y: 4.0 });
///
/// let json = layout.to_json()?;
/// assert_eq!(json, r#"{"1":{"x":3.0,"y":4.0}}"#);
/// assert_eq!(Layout::from_json(&json)?, layout);
/// # Ok::<(), graphlab::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    positions: BTreeMap<VertexId, Position>,
}

impl Layout {
    /// Creates an empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `count` vertices evenly on a circle of `radius` around the origin,
    /// vertex 0 at angle zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn circular(count: usize, radius: f64) -> Self {
        let positions = (0..count)
            .map(|i| {
                let angle = TAU * i as f64 / count as f64;
                let position = Position {
                    x: radius * angle.cos(),
                    y: radius * angle.sin(),
                };
                (VertexId::new(i), position)
            })
            .collect();
        Layout { positions }
    }

    /// Sets the position of `vertex`, returning the previous one.
    pub fn set(&mut self, vertex: VertexId, position: Position) -> Option<Position> {
        self.positions.insert(vertex, position)
    }

    /// Returns the position of `vertex`.
    #[must_use]
    pub fn get(&self, vertex: VertexId) -> Option<Position> {
        self.positions.get(&vertex).copied()
    }

    /// Forgets the position of `vertex`.
    pub fn remove(&mut self, vertex: VertexId) -> Option<Position> {
        self.positions.remove(&vertex)
    }

    /// Returns the number of placed vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if no vertex is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the placed vertices and their positions in ascending vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, Position)> + '_ {
        self.positions.iter().map(|(&vertex, &position)| (vertex, position))
    }

    /// Returns the vertices of `graph` that have no position.
    #[must_use]
    pub fn unplaced(&self, graph: &Graph) -> Vec<VertexId> {
        graph
            .vertices()
            .filter(|vertex| !self.positions.contains_key(vertex))
            .collect()
    }

    /// Drops positions of vertices that `graph` does not have.
    pub fn retain_graph(&mut self, graph: &Graph) {
        self.positions.retain(|&vertex, _| graph.contains_vertex(vertex));
    }

    /// Serializes to the compact JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses the JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if the document is not an object
    /// of `{x, y}` records keyed by vertex ids.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the layout to `path`, replacing any previous file atomically.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self)?;
        write_atomically(path, &json)?;
        log::debug!("Saved {} positions to {}", self.len(), path.display());
        Ok(())
    }

    /// Reads a layout from `path`.
    ///
    /// The document is parsed completely before anything is returned, so a failed
    /// load never hands back a partial layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the file cannot be read and
    /// [`Error::Json`](crate::Error::Json) if it is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        let layout: Layout = serde_json::from_slice(&data)?;
        log::debug!("Loaded {} positions from {}", layout.len(), path.display());
        Ok(layout)
    }
}
