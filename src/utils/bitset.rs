//! A growable bit vector for vertex sets.
//!
//! Vertex sets show up in two places: as the visited-set component of the hashed TSP
//! memo key, where the set must be hashable, and as the "visited" vertex overlay kept
//! during replay, where the set grows together with the graph.
//!
//! # Example
//!
//! ```rust
//! use graphlab::utils::BitSet;
//!
//! let mut set = BitSet::new(100);
//! set.insert(0);
//! set.insert(50);
//! set.insert(99);
//!
//! assert!(set.contains(50));
//! assert_eq!(set.count(), 3);
//! assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 50, 99]);
//! ```

/// A bit vector with value semantics (`Eq` and `Hash` compare members and capacity).
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitSet {
    /// The bits, stored as a vector of words.
    words: Vec<u64>,
    /// The number of addressable bits.
    len: usize,
}

impl BitSet {
    /// Creates a new empty bit set able to hold indices `0..capacity`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(64)],
            len: capacity,
        }
    }

    /// Returns the number of addressable bits.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no bit is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Extends the addressable range to at least `capacity` bits.
    pub fn grow(&mut self, capacity: usize) {
        if capacity > self.len {
            self.words.resize(capacity.div_ceil(64), 0);
            self.len = capacity;
        }
    }

    /// Sets the bit at `index`, growing the set if needed.
    ///
    /// Returns `true` if the bit was previously clear.
    pub fn insert(&mut self, index: usize) -> bool {
        self.grow(index + 1);
        let word = &mut self.words[index / 64];
        let mask = 1u64 << (index % 64);
        let fresh = *word & mask == 0;
        *word |= mask;
        fresh
    }

    /// Clears the bit at `index`; indices outside the set are ignored.
    pub fn remove(&mut self, index: usize) {
        if index < self.len {
            self.words[index / 64] &= !(1u64 << (index % 64));
        }
    }

    /// Returns `true` if the bit at `index` is set.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        index < self.len && (self.words[index / 64] & (1u64 << (index % 64))) != 0
    }

    /// Returns a copy of this set with `index` added.
    #[must_use]
    pub fn with(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.insert(index);
        next
    }

    /// Returns the number of bits set.
    #[must_use]
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Clears all bits without changing the capacity.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Returns an iterator over the indices of set bits, ascending.
    pub fn iter(&self) -> BitSetIter<'_> {
        BitSetIter {
            set: self,
            word_idx: 0,
            bit_idx: 0,
        }
    }
}

impl std::fmt::Debug for BitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the set bits in a `BitSet`.
pub struct BitSetIter<'a> {
    set: &'a BitSet,
    word_idx: usize,
    bit_idx: usize,
}

impl Iterator for BitSetIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.word_idx < self.set.words.len() {
            let word = self.set.words[self.word_idx];
            while self.bit_idx < 64 {
                let idx = self.word_idx * 64 + self.bit_idx;
                if idx >= self.set.len {
                    return None;
                }
                self.bit_idx += 1;
                if (word & (1u64 << (self.bit_idx - 1))) != 0 {
                    return Some(idx);
                }
            }
            self.word_idx += 1;
            self.bit_idx = 0;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bitset_basic() {
        let mut bs = BitSet::new(100);
        assert!(bs.is_empty());

        assert!(bs.insert(0));
        assert!(bs.insert(99));
        assert!(!bs.insert(99));

        assert!(bs.contains(0));
        assert!(!bs.contains(1));
        assert!(!bs.contains(1000));
        assert_eq!(bs.count(), 2);

        bs.remove(0);
        assert!(!bs.contains(0));
        assert_eq!(bs.count(), 1);
    }

    #[test]
    fn test_bitset_grows_on_insert() {
        let mut bs = BitSet::new(4);
        bs.insert(130);
        assert!(bs.len() >= 131);
        assert!(bs.contains(130));
        assert_eq!(bs.iter().collect::<Vec<_>>(), vec![130]);
    }

    #[test]
    fn test_bitset_with_is_persistent() {
        let base = BitSet::new(8).with(1);
        let extended = base.with(3);
        assert_eq!(base.iter().collect::<Vec<_>>(), vec![1]);
        assert_eq!(extended.iter().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_bitset_hash_by_members() {
        let mut set = HashSet::new();
        set.insert(BitSet::new(16).with(2).with(5));
        set.insert(BitSet::new(16).with(5).with(2));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_bitset_clear() {
        let mut bs = BitSet::new(70);
        bs.insert(65);
        bs.clear();
        assert!(bs.is_empty());
        assert_eq!(bs.len(), 70);
    }

    #[test]
    fn test_bitset_debug() {
        let bs = BitSet::new(10).with(1).with(4);
        assert_eq!(format!("{bs:?}"), "{1, 4}");
    }
}
