//! Synchronization utilities for background benchmark runs.
//!
//! # Key Components
//!
//! - [`StopFlag`] - A cooperative cancellation flag shared between a caller and a worker
//!
//! Cancellation is never preemptive. The worker polls the flag at well-defined points
//! (between benchmark iterations) and winds down on its own; a caller that needs the
//! worker gone must still wait for it to observe the flag and return.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// A cloneable, thread-safe "please stop" signal.
///
/// Every clone observes the same flag. Once requested, a stop stays requested until
/// [`reset`](StopFlag::reset) is called.
///
/// # Examples
///
/// ```rust
/// use graphlab::utils::StopFlag;
/// use std::thread;
///
/// let flag = StopFlag::new();
/// let worker_flag = flag.clone();
///
/// let handle = thread::spawn(move || {
///     let mut rounds = 0;
///     while !worker_flag.is_requested() {
///         rounds += 1;
///         thread::yield_now();
///     }
///     rounds
/// });
///
/// flag.request();
/// let _ = handle.join().unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct StopFlag {
    requested: Arc<AtomicBool>,
}

impl StopFlag {
    /// Creates a flag in the "keep running" state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a stop. Idempotent.
    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Returns `true` once a stop has been requested.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Clears a previous request so the flag can be reused for another run.
    pub fn reset(&self) {
        self.requested.store(false, Ordering::Release);
    }
}
