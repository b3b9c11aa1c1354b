//! Empirical complexity measurement.
//!
//! A benchmark grows one working graph over many iterations and times a single
//! `execute` call on it each time, producing an `(x, cost)` series where `x` comes from
//! the selected [`Complexity`] function. Plotting the series against `x` shows whether
//! an algorithm scales the way its big-O bound says.
//!
//! # Key Components
//!
//! - [`BenchmarkRunner`] - The synchronous grow-and-measure loop
//! - [`BenchmarkWorker`] - The same loop on a background thread, one run at a time
//! - [`TimeSource`] / [`MonotonicClock`] - Injectable cost counter
//! - [`SampleSeries`] - The result, with its JSON persistence
//! - [`SpikeFilter`] - Post-hoc outlier removal
//!
//! # Examples
//!
//! ```rust
//! use graphlab::algorithms::{Dijkstra, QueueStrategy};
//! use graphlab::benchmark::{BenchmarkConfig, BenchmarkRunner, Complexity, SpikeFilter};
//! use graphlab::utils::StopFlag;
//!
//! let config = BenchmarkConfig {
//!     iterations: 50,
//!     complexity: Complexity::Edges,
//!     seed: Some(9),
//!     ..BenchmarkConfig::default()
//! };
//! let report = BenchmarkRunner::new(config).run(&mut Dijkstra::new(QueueStrategy::Eager), &StopFlag::new());
//! let smoothed = SpikeFilter::default().apply(&report.series);
//!
//! assert!(smoothed.len() <= report.series.len());
//! ```

mod complexity;
mod runner;
mod series;
mod worker;

pub use complexity::Complexity;
pub use runner::{
    BenchmarkConfig, BenchmarkReport, BenchmarkRunner, MonotonicClock, SteppingClock, TimeSource,
};
pub use series::{Sample, SampleSeries, SpikeFilter};
pub use worker::{BenchmarkWorker, Completed};
