//! Shared building blocks used across the crate.
//!
//! - [`BitSet`] - growable vertex set, hashable for memo keys
//! - [`IndexedMinHeap`] - min-heap with decrease-key for the eager queue variants
//! - [`StopFlag`] - cooperative cancellation for background runs
//! - [`write_atomically`] - temp-file-and-rename saves

mod atomic;
mod bitset;
mod heap;
mod synchronization;

pub use atomic::write_atomically;
pub use bitset::{BitSet, BitSetIter};
pub use heap::IndexedMinHeap;
pub use synchronization::StopFlag;
