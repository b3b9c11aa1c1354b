//! Indexed binary min-heap with decrease-key.
//!
//! The eager Dijkstra and eager Prim variants keep at most one queue entry per vertex
//! and lower its priority in place when a better candidate shows up. A plain
//! `BinaryHeap` cannot do that, so this heap tracks the slot of every item in a
//! position map, which makes `contains` O(1) and `decrease_key` O(log n).
//!
//! Ties on priority are broken by the item index so the pop order is deterministic.

use crate::graph::Weight;

/// One heap slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapEntry {
    priority: Weight,
    item: usize,
}

impl HeapEntry {
    #[inline]
    fn key(self) -> (Weight, usize) {
        (self.priority, self.item)
    }
}

/// Min-heap over item indices `0..capacity` with an O(1) position lookup.
#[derive(Debug, Clone, Default)]
pub struct IndexedMinHeap {
    /// Binary heap layout, smallest `(priority, item)` at index 0
    entries: Vec<HeapEntry>,
    /// `positions[item]` is the slot of `item` in `entries`, if queued
    positions: Vec<Option<usize>>,
}

impl IndexedMinHeap {
    /// Creates an empty heap that accepts items `0..capacity`.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        IndexedMinHeap {
            entries: Vec::with_capacity(capacity),
            positions: vec![None; capacity],
        }
    }

    /// Returns the number of queued items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `item` is currently queued.
    #[must_use]
    pub fn contains(&self, item: usize) -> bool {
        self.positions.get(item).copied().flatten().is_some()
    }

    /// Returns the queued priority of `item`.
    #[must_use]
    pub fn priority(&self, item: usize) -> Option<Weight> {
        let slot = self.positions.get(item).copied().flatten()?;
        Some(self.entries[slot].priority)
    }

    /// Queues `item`, or lowers its priority if it is already queued with a higher one.
    ///
    /// Returns `true` if the heap changed.
    pub fn push_or_decrease(&mut self, item: usize, priority: Weight) -> bool {
        if item >= self.positions.len() {
            self.positions.resize(item + 1, None);
        }

        match self.positions[item] {
            Some(slot) if self.entries[slot].priority <= priority => false,
            Some(slot) => {
                self.entries[slot].priority = priority;
                self.sift_up(slot);
                true
            }
            None => {
                let slot = self.entries.len();
                self.entries.push(HeapEntry { priority, item });
                self.positions[item] = Some(slot);
                self.sift_up(slot);
                true
            }
        }
    }

    /// Removes and returns the item with the smallest priority.
    pub fn pop(&mut self) -> Option<(usize, Weight)> {
        let last = self.entries.len().checked_sub(1)?;
        self.swap(0, last);
        let top = self.entries.pop()?;
        self.positions[top.item] = None;
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some((top.item, top.priority))
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        for entry in self.entries.drain(..) {
            self.positions[entry.item] = None;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.positions[self.entries[a].item] = Some(a);
        self.positions[self.entries[b].item] = Some(b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.entries[slot].key() >= self.entries[parent].key() {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;

            if left < len && self.entries[left].key() < self.entries[smallest].key() {
                smallest = left;
            }
            if right < len && self.entries[right].key() < self.entries[smallest].key() {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}
