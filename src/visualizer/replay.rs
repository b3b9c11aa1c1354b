//! Pull-based replay of an algorithm's reveal script.

use crate::{algorithms::RevealUnit, visualizer::VisualState};

/// Result of one [`Replay::advance`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The unit was revealed and applied to the visual state
    Revealed(RevealUnit),
    /// The replay is paused; the cursor did not move
    Paused,
    /// Every unit has been revealed
    Done,
}

/// Cursor over a reveal script plus the visual state it has produced.
///
/// Nothing here knows about time. A scheduler (see
/// [`Visualizer`](crate::visualizer::Visualizer)) or a test calls
/// [`advance`](Replay::advance) once per tick.
///
/// # Examples
///
/// ```rust
/// use graphlab::algorithms::RevealUnit;
/// use graphlab::graph::VertexId;
/// use graphlab::visualizer::{Replay, Step};
///
/// let mut replay = Replay::new();
/// replay.run(RevealUnit::along(&[VertexId::new(0), VertexId::new(1), VertexId::new(2)]));
///
/// assert!(matches!(replay.advance(), Step::Revealed(_)));
/// assert!(matches!(replay.advance(), Step::Revealed(_)));
/// assert_eq!(replay.advance(), Step::Done);
/// assert!(replay.state().is_vertex_visited(VertexId::new(2)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Replay {
    units: Vec<RevealUnit>,
    cursor: usize,
    paused: bool,
    state: VisualState,
}

impl Replay {
    /// Creates an empty replay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts replaying `units` from the beginning, discarding any previous script.
    pub fn run(&mut self, units: Vec<RevealUnit>) {
        self.reset();
        log::debug!("Replaying {} units", units.len());
        self.units = units;
    }

    /// Reveals the unit under the cursor and moves past it.
    pub fn advance(&mut self) -> Step {
        if self.is_done() {
            return Step::Done;
        }
        if self.paused {
            return Step::Paused;
        }

        let unit = self.units[self.cursor].clone();
        self.state.apply(&unit);
        self.cursor += 1;
        Step::Revealed(unit)
    }

    /// Pauses or resumes; the cursor is kept either way.
    pub fn set_pause(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Returns `true` while paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Drops the script and the visual state and rewinds the cursor.
    pub fn reset(&mut self) {
        self.units.clear();
        self.cursor = 0;
        self.paused = false;
        self.state.clear();
    }

    /// Returns the number of units revealed so far.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the script being replayed.
    #[must_use]
    pub fn units(&self) -> &[RevealUnit] {
        &self.units
    }

    /// Returns the number of units not yet revealed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.units.len() - self.cursor
    }

    /// Returns the revealed fraction in `0.0..=1.0`; an empty script counts as complete.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        if self.units.is_empty() {
            1.0
        } else {
            self.cursor as f64 / self.units.len() as f64
        }
    }

    /// Returns `true` once every unit has been revealed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.cursor >= self.units.len()
    }

    /// Returns what has been revealed so far.
    #[must_use]
    pub fn state(&self) -> &VisualState {
        &self.state
    }
}
