//! Bellman-Ford single-source shortest paths.
//!
//! The relaxation loop runs at most `V - 1` passes over every arc. With `early_exit`
//! set it stops after the first pass that changes nothing. Exactly one detection pass
//! follows: if any arc can still be relaxed, a negative cycle is reachable from the
//! start vertex and the run is flagged. A flagged run reports no paths.
//!
//! Undirected edges are relaxed in both directions, so a single negative undirected
//! edge is itself a negative cycle.

use crate::{
    algorithms::{
        require_start, require_vertex,
        schema::{self, find_setting, SettingSpec, SettingValue},
        AlgorithmKind, GraphAlgorithm, Outcome, RevealUnit, ShortestPathTree,
    },
    graph::{Graph, VertexId, Weight},
    Error, Precondition, Result,
};

const EARLY_EXIT: SettingSpec = SettingSpec::flag(
    "early_exit",
    "Stop as soon as a full pass relaxes nothing",
);

const SETTINGS: &[SettingSpec] = &[schema::START, schema::END, EARLY_EXIT];

/// Bellman-Ford over arbitrary edge weights.
#[derive(Debug, Clone)]
pub struct BellmanFord {
    start: VertexId,
    end: Option<VertexId>,
    early_exit: bool,
    tree: ShortestPathTree,
    passes: usize,
    negative_cycle: bool,
    executed: bool,
}

impl Default for BellmanFord {
    fn default() -> Self {
        BellmanFord {
            start: VertexId::default(),
            end: None,
            early_exit: true,
            tree: ShortestPathTree::default(),
            passes: 0,
            negative_cycle: false,
            executed: false,
        }
    }
}

impl BellmanFord {
    /// Creates a run from vertex 0 with early exit enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start vertex.
    #[must_use]
    pub fn starting_at(mut self, start: VertexId) -> Self {
        self.start = start;
        self
    }

    /// Sets the end vertex whose path is reported.
    #[must_use]
    pub fn ending_at(mut self, end: VertexId) -> Self {
        self.end = Some(end);
        self
    }

    /// Enables or disables stopping after a pass without changes.
    #[must_use]
    pub fn with_early_exit(mut self, early_exit: bool) -> Self {
        self.early_exit = early_exit;
        self
    }

    /// Returns the distances of the last run, indexed by vertex.
    ///
    /// Unreliable when [`has_negative_cycle`](BellmanFord::has_negative_cycle) is `true`.
    #[must_use]
    pub fn distances(&self) -> &[Option<Weight>] {
        self.tree.distances()
    }

    /// Returns `true` if the last run found a negative cycle reachable from the start.
    #[must_use]
    pub fn has_negative_cycle(&self) -> bool {
        self.negative_cycle
    }

    /// Returns the number of relaxation passes the last run performed.
    #[must_use]
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Returns the shortest path to `target`, or `None` if it is unreachable or a
    /// negative cycle was detected.
    #[must_use]
    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        if self.negative_cycle {
            return None;
        }
        self.tree.path_to(target)
    }

    /// Runs one pass over every arc leaving a reached vertex.
    fn relax_all(tree: &mut ShortestPathTree, graph: &Graph) -> bool {
        let mut changed = false;
        for from in graph.vertices() {
            let Some(distance) = tree.distance(from) else {
                continue;
            };
            for (to, weight) in graph.neighbors(from) {
                changed |= tree.relax(from, to, distance.saturating_add(weight));
            }
        }
        changed
    }
}

impl GraphAlgorithm for BellmanFord {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::BellmanFord
    }

    fn check(&self, graph: &Graph) -> std::result::Result<(), Precondition> {
        require_start(graph, self.start)?;
        if let Some(end) = self.end {
            require_vertex(graph, end)?;
        }
        Ok(())
    }

    fn execute(&mut self, graph: &Graph) {
        self.clear();
        if !graph.contains_vertex(self.start) {
            return;
        }

        self.tree = ShortestPathTree::new(graph.vertex_count(), self.start);
        for _ in 1..graph.vertex_count() {
            self.passes += 1;
            let changed = Self::relax_all(&mut self.tree, graph);
            if self.early_exit && !changed {
                break;
            }
        }

        // Detection pass runs on a copy so the reported distances stay those of pass V-1
        let mut probe = self.tree.clone();
        self.negative_cycle = Self::relax_all(&mut probe, graph);
        self.executed = true;

        if self.negative_cycle {
            log::debug!("Bellman-Ford found a negative cycle after {} passes", self.passes);
        }
    }

    fn clear(&mut self) {
        self.tree = ShortestPathTree::default();
        self.passes = 0;
        self.negative_cycle = false;
        self.executed = false;
    }

    fn outcome(&self) -> Outcome {
        if !self.executed {
            return Outcome::Pending;
        }
        Outcome::ShortestPaths {
            distances: self.tree.distances().to_vec(),
            path: self.end.and_then(|end| self.path_to(end)),
            negative_cycle: self.negative_cycle,
        }
    }

    fn reveal_units(&self) -> Vec<RevealUnit> {
        if self.negative_cycle {
            return Vec::new();
        }
        match self.end {
            Some(end) => self
                .path_to(end)
                .map(|path| RevealUnit::along(&path))
                .unwrap_or_default(),
            None => {
                let order: Vec<VertexId> = (0..self.tree.distances().len())
                    .map(VertexId::new)
                    .collect();
                self.tree
                    .tree_edges(&order)
                    .map(|(from, to)| RevealUnit::edge(from, to))
                    .collect()
            }
        }
    }

    fn settings(&self) -> &'static [SettingSpec] {
        SETTINGS
    }

    fn get_setting(&self, name: &str) -> Result<SettingValue> {
        match name {
            "start" => Ok(SettingValue::Vertex(self.start)),
            "end" => Ok(SettingValue::OptionalVertex(self.end)),
            "early_exit" => Ok(SettingValue::Bool(self.early_exit)),
            _ => Err(Error::UnknownSetting(name.to_string())),
        }
    }

    fn set_setting(&mut self, name: &str, value: SettingValue) -> Result<()> {
        let spec = find_setting(SETTINGS, name)?;
        match spec.name {
            "end" => self.end = value.into_optional_vertex(spec)?,
            "early_exit" => self.early_exit = value.into_bool(spec)?,
            _ => self.start = value.into_vertex(spec)?,
        }
        Ok(())
    }
}
