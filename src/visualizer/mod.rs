//! Stepped replay of algorithm results.
//!
//! An algorithm produces its whole result synchronously; the visualizer then shows it
//! one [`RevealUnit`] at a time. The logic is split in two layers:
//!
//! - [`Replay`] is a pure state machine: [`advance`](Replay::advance) reveals the next
//!   unit or reports [`Step::Done`]. It is driven by whoever calls it and is trivially
//!   testable.
//! - [`Visualizer`] adds the fixed-interval schedule on top. It does not own a timer;
//!   the surrounding event loop calls [`poll`](Visualizer::poll) with the current time
//!   and receives the units whose tick has come.
//!
//! # Examples
//!
//! ```rust
//! use std::time::{Duration, Instant};
//!
//! use graphlab::algorithms::{Bfs, GraphAlgorithm};
//! use graphlab::graph::{Graph, StorageKind};
//! use graphlab::visualizer::{ReplayConfig, Visualizer};
//!
//! let graph = Graph::from_edges(false, StorageKind::AdjacencyList, [(0, 1, 1), (1, 2, 1)]);
//! let mut bfs = Bfs::new();
//! bfs.run(&graph)?;
//!
//! let start = Instant::now();
//! let mut visualizer = Visualizer::new(ReplayConfig { interval: Duration::from_millis(10) });
//! visualizer.start(bfs.reveal_units(), start);
//!
//! assert!(visualizer.poll(start + Duration::from_millis(5)).is_empty());
//! assert_eq!(visualizer.poll(start + Duration::from_millis(25)).len(), 2);
//! # Ok::<(), graphlab::Error>(())
//! ```

mod replay;
mod state;

use std::time::{Duration, Instant};

use crate::algorithms::RevealUnit;

pub use replay::{Replay, Step};
pub use state::VisualState;

/// Replay scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Time between two reveals; zero reveals everything on the next poll (default: 1s)
    pub interval: Duration,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        ReplayConfig {
            interval: Duration::from_millis(1000),
        }
    }
}

/// A [`Replay`] released on a fixed schedule.
#[derive(Debug, Clone, Default)]
pub struct Visualizer {
    replay: Replay,
    config: ReplayConfig,
    /// Time of the last delivered tick; `None` when stopped
    last_tick: Option<Instant>,
    /// When the current pause began
    paused_at: Option<Instant>,
}

impl Visualizer {
    /// Creates a stopped visualizer.
    #[must_use]
    pub fn new(config: ReplayConfig) -> Self {
        Visualizer {
            replay: Replay::new(),
            config,
            last_tick: None,
            paused_at: None,
        }
    }

    /// Starts replaying `units`; the first tick falls one interval after `now`.
    pub fn start(&mut self, units: Vec<RevealUnit>, now: Instant) {
        self.replay.run(units);
        self.last_tick = Some(now);
        self.paused_at = None;
    }

    /// Releases one unit per interval elapsed since the last tick.
    ///
    /// While paused no ticks accrue, so resuming does not release a backlog whether
    /// or not the schedule was polled during the pause. The schedule stops by itself
    /// on the first tick that finds nothing left to reveal.
    pub fn poll(&mut self, now: Instant) -> Vec<RevealUnit> {
        let mut released = Vec::new();
        let Some(mut last) = self.last_tick else {
            return released;
        };
        if self.replay.is_paused() {
            return released;
        }

        loop {
            if !self.config.interval.is_zero() {
                match last.checked_add(self.config.interval) {
                    Some(next) if next <= now => last = next,
                    _ => break,
                }
            }

            match self.replay.advance() {
                Step::Revealed(unit) => released.push(unit),
                Step::Paused => break,
                Step::Done => {
                    log::debug!("Replay finished after {} units", self.replay.cursor());
                    self.last_tick = None;
                    return released;
                }
            }
        }

        self.last_tick = Some(last);
        released
    }

    /// Pauses or resumes the schedule at `now` without losing the cursor.
    ///
    /// The time spent paused is added to the schedule on resume, so the next tick
    /// falls as far after the resume as it would have fallen after the pause.
    pub fn set_pause(&mut self, paused: bool, now: Instant) {
        if paused == self.replay.is_paused() {
            return;
        }
        self.replay.set_pause(paused);

        if paused {
            self.paused_at = Some(now);
        } else if let Some(since) = self.paused_at.take() {
            let paused_for = now.saturating_duration_since(since);
            self.last_tick = self
                .last_tick
                .map(|last| last.checked_add(paused_for).unwrap_or(now));
        }
    }

    /// Stops the schedule and empties the replay.
    pub fn reset(&mut self) {
        self.replay.reset();
        self.last_tick = None;
        self.paused_at = None;
    }

    /// Returns `true` while ticks are being delivered (paused counts as running).
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.last_tick.is_some()
    }

    /// Returns the underlying replay.
    #[must_use]
    pub fn replay(&self) -> &Replay {
        &self.replay
    }

    /// Returns what has been revealed so far.
    #[must_use]
    pub fn state(&self) -> &VisualState {
        self.replay.state()
    }

    /// Returns the schedule configuration.
    #[must_use]
    pub fn config(&self) -> ReplayConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VertexId;

    fn v(index: usize) -> VertexId {
        VertexId::new(index)
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn visualizer() -> (Visualizer, Instant) {
        let start = Instant::now();
        let mut visualizer = Visualizer::new(ReplayConfig::default());
        visualizer.start(RevealUnit::along(&[v(0), v(1), v(2), v(3)]), start);
        (visualizer, start)
    }

    #[test]
    fn test_default_interval() {
        assert_eq!(ReplayConfig::default().interval, ms(1000));
    }

    #[test]
    fn test_one_unit_per_interval() {
        let (mut visualizer, start) = visualizer();

        assert!(visualizer.poll(start + ms(999)).is_empty());
        assert_eq!(
            visualizer.poll(start + ms(1000)),
            vec![RevealUnit::edge(v(0), v(1))]
        );
        assert_eq!(visualizer.poll(start + ms(3500)).len(), 2);
        assert!(visualizer.is_running());

        // The tick after the last unit signals completion
        assert!(visualizer.poll(start + ms(4000)).is_empty());
        assert!(!visualizer.is_running());
        assert!(visualizer.replay().is_done());
    }

    #[test]
    fn test_pause_does_not_accumulate_ticks() {
        let (mut visualizer, start) = visualizer();
        assert_eq!(visualizer.poll(start + ms(1000)).len(), 1);

        visualizer.set_pause(true, start + ms(1000));
        assert!(visualizer.poll(start + ms(10_000)).is_empty());
        assert_eq!(visualizer.replay().cursor(), 1);

        visualizer.set_pause(false, start + ms(10_000));
        assert!(visualizer.poll(start + ms(10_500)).is_empty());
        assert_eq!(visualizer.poll(start + ms(11_000)).len(), 1);
        assert_eq!(visualizer.replay().cursor(), 2);
    }

    #[test]
    fn test_resume_without_polling_releases_no_backlog() {
        let (mut visualizer, start) = visualizer();
        assert_eq!(visualizer.poll(start + ms(1000)).len(), 1);

        visualizer.set_pause(true, start + ms(1000));
        visualizer.set_pause(false, start + ms(6000));
        assert!(visualizer.poll(start + ms(6000)).is_empty());
        assert_eq!(visualizer.poll(start + ms(7000)).len(), 1);
        assert_eq!(visualizer.replay().cursor(), 2);
    }

    #[test]
    fn test_pause_keeps_partial_interval() {
        let (mut visualizer, start) = visualizer();

        // 400ms of the first interval elapse before the pause
        visualizer.set_pause(true, start + ms(400));
        visualizer.set_pause(true, start + ms(900));
        visualizer.set_pause(false, start + ms(5400));
        assert!(visualizer.poll(start + ms(5999)).is_empty());
        assert_eq!(visualizer.poll(start + ms(6000)).len(), 1);
    }

    #[test]
    fn test_zero_interval_releases_everything() {
        let start = Instant::now();
        let mut visualizer = Visualizer::new(ReplayConfig {
            interval: Duration::ZERO,
        });
        visualizer.start(RevealUnit::along(&[v(0), v(1), v(2)]), start);

        assert_eq!(visualizer.poll(start).len(), 2);
        assert!(!visualizer.is_running());
        assert!(visualizer.state().is_vertex_visited(v(2)));
    }

    #[test]
    fn test_reset_stops_schedule() {
        let (mut visualizer, start) = visualizer();
        visualizer.poll(start + ms(1000));
        visualizer.reset();

        assert!(!visualizer.is_running());
        assert!(visualizer.poll(start + ms(5000)).is_empty());
        assert_eq!(visualizer.state().vertex_count(), 0);
    }
}
