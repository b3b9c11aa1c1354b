//! Running a benchmark on a background thread.
//!
//! The worker takes ownership of the algorithm for the duration of the run, so no
//! other thread can touch its scratch state, and hands it back together with the
//! report through a one-shot channel. Cancellation is cooperative: [`BenchmarkWorker::stop`]
//! raises a [`StopFlag`] that the loop checks between iterations.

use std::{
    sync::mpsc::{self, Receiver, TryRecvError},
    thread::{self, JoinHandle},
};

use crate::{
    algorithms::GraphAlgorithm,
    benchmark::{BenchmarkConfig, BenchmarkReport, BenchmarkRunner},
    utils::StopFlag,
    Error, Result,
};

/// Stack size of the worker thread; the recursive DFS needs room for its depth cap.
const WORKER_STACK_SIZE: usize = 64 * 1024 * 1024;

/// A finished run: the report and the algorithm, ready for reuse.
#[derive(Debug)]
pub struct Completed {
    /// The algorithm that was measured, with its scratch state cleared
    pub algorithm: Box<dyn GraphAlgorithm>,
    /// What the run produced
    pub report: BenchmarkReport,
}

/// The run currently owned by a worker.
struct InFlight {
    receiver: Receiver<Completed>,
    handle: JoinHandle<()>,
}

/// Runs one benchmark at a time on a dedicated thread.
///
/// # Examples
///
/// ```rust
/// use graphlab::algorithms::Dfs;
/// use graphlab::benchmark::{BenchmarkConfig, BenchmarkWorker};
///
/// let mut worker = BenchmarkWorker::new(BenchmarkConfig { iterations: 10, seed: Some(3), ..BenchmarkConfig::default() });
/// worker.start(Box::new(Dfs::new()))?;
///
/// let completed = worker.wait()?;
/// assert_eq!(completed.report.measured, 10);
/// assert!(!worker.is_running());
/// # Ok::<(), graphlab::Error>(())
/// ```
pub struct BenchmarkWorker {
    config: BenchmarkConfig,
    stop: StopFlag,
    in_flight: Option<InFlight>,
}

impl BenchmarkWorker {
    /// Creates an idle worker.
    #[must_use]
    pub fn new(config: BenchmarkConfig) -> Self {
        BenchmarkWorker {
            config,
            stop: StopFlag::new(),
            in_flight: None,
        }
    }

    /// Returns the configuration used for the next run.
    #[must_use]
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Replaces the configuration used for the next run.
    pub fn set_config(&mut self, config: BenchmarkConfig) {
        self.config = config;
    }

    /// Starts benchmarking `algorithm` in the background.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BenchmarkRunning`] if a previous run has not been collected
    /// with [`wait`](Self::wait) or [`try_finish`](Self::try_finish), and
    /// [`Error::Io`] if the thread cannot be spawned.
    pub fn start(&mut self, mut algorithm: Box<dyn GraphAlgorithm>) -> Result<()> {
        if self.in_flight.is_some() {
            return Err(Error::BenchmarkRunning);
        }

        self.stop.reset();
        let stop = self.stop.clone();
        let runner = BenchmarkRunner::new(self.config.clone());
        let (sender, receiver) = mpsc::channel();

        let handle = thread::Builder::new()
            .name(format!("graphlab-bench-{}", algorithm.kind()))
            .stack_size(WORKER_STACK_SIZE)
            .spawn(move || {
                let report = runner.run(algorithm.as_mut(), &stop);
                // The receiver is gone only if the worker was dropped mid-run
                let _ = sender.send(Completed { algorithm, report });
            })?;

        self.in_flight = Some(InFlight { receiver, handle });
        Ok(())
    }

    /// Asks the running benchmark to stop after its current iteration.
    pub fn stop(&self) {
        if self.in_flight.is_some() {
            log::info!("Stop requested for the running benchmark");
            self.stop.request();
        }
    }

    /// Returns `true` while a run has been started and not yet collected.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Collects the finished run without blocking.
    ///
    /// Returns `None` if nothing is running or the run is still in progress.
    pub fn try_finish(&mut self) -> Option<Result<Completed>> {
        let in_flight = self.in_flight.as_ref()?;
        match in_flight.receiver.try_recv() {
            Ok(completed) => {
                self.collect();
                Some(Ok(completed))
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(self.collect_failure())),
        }
    }

    /// Blocks until the run finishes and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BenchmarkAborted`] if nothing is running and
    /// [`Error::WorkerPanicked`] if the algorithm panicked on the worker thread (the
    /// algorithm is lost in that case).
    pub fn wait(&mut self) -> Result<Completed> {
        let Some(in_flight) = self.in_flight.as_ref() else {
            return Err(Error::BenchmarkAborted);
        };
        match in_flight.receiver.recv() {
            Ok(completed) => {
                self.collect();
                Ok(completed)
            }
            Err(_) => Err(self.collect_failure()),
        }
    }

    /// Joins the finished thread of a successful run.
    fn collect(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            let _ = in_flight.handle.join();
        }
    }

    /// Joins a thread that hung up without sending and classifies the failure.
    fn collect_failure(&mut self) -> Error {
        match self.in_flight.take().map(|in_flight| in_flight.handle.join()) {
            Some(Err(_)) => {
                log::warn!("Benchmark worker thread panicked");
                Error::WorkerPanicked
            }
            _ => Error::BenchmarkAborted,
        }
    }
}

impl Drop for BenchmarkWorker {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            self.stop.request();
            let _ = in_flight.handle.join();
        }
    }
}

impl std::fmt::Debug for BenchmarkWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkWorker")
            .field("config", &self.config)
            .field("running", &self.is_running())
            .finish()
    }
}
