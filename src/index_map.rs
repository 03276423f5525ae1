//! IndexMap: dense sequential ids for distinct keys.

use crate::chained_map::{ChainedHashMap, DEFAULT_BUCKET_COUNT};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

/// Assigns each distinct key the next unused index, starting at 0.
///
/// Wraps a [`ChainedHashMap`] with `usize` values and adds one policy on top
/// of upsert: the first time a key is seen it receives the current entry
/// count as its index, so after N distinct keys the assigned indices are
/// exactly `0..N`. Re-adding a key returns its original index unchanged.
///
/// Only the table's public surface is used; there is no reliance on its
/// internals.
pub struct IndexMap<K, S = RandomState> {
    table: ChainedHashMap<K, usize, S>,
}

impl<K> IndexMap<K>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_bucket_count(DEFAULT_BUCKET_COUNT)
    }

    /// Counts below 1 fall back to [`DEFAULT_BUCKET_COUNT`], as for the
    /// underlying table.
    pub fn with_bucket_count(bucket_count: usize) -> Self {
        Self {
            table: ChainedHashMap::with_bucket_count(bucket_count),
        }
    }
}

impl<K> Default for IndexMap<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> IndexMap<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            table: ChainedHashMap::with_hasher(hasher),
        }
    }

    pub fn with_bucket_count_and_hasher(bucket_count: usize, hasher: S) -> Self {
        Self {
            table: ChainedHashMap::with_bucket_count_and_hasher(bucket_count, hasher),
        }
    }

    /// The index for `key`: its existing one if the key has been seen, else
    /// the next unused index, recorded and returned.
    pub fn add(&mut self, key: K) -> usize {
        // On a miss the table grows by one, so len-before-insert is exactly
        // the next unused index.
        let next = self.table.len();
        *self.table.get_or_insert_with(key, || next)
    }

    /// The index already assigned to `q`, if any. Never assigns.
    pub fn index_of<Q>(&self, q: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.get(q).copied()
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.contains_key(q)
    }

    /// Number of distinct keys seen, which is also the next index to be
    /// assigned.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }

    /// Forget every assignment. Numbering restarts at 0.
    pub fn clear(&mut self) {
        self.table.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::Hasher;

    /// Invariant: The n-th distinct key receives index n-1; re-adding a
    /// seen key returns its original index and does not grow the map.
    #[test]
    fn dense_first_sight_assignment() {
        let mut ids: IndexMap<String> = IndexMap::new();
        assert_eq!(ids.add("x".to_string()), 0);
        assert_eq!(ids.add("y".to_string()), 1);
        assert_eq!(ids.add("x".to_string()), 0);
        assert_eq!(ids.add("z".to_string()), 2);
        assert_eq!(ids.len(), 3);
    }

    /// Invariant: `index_of` reads back assignments without assigning.
    #[test]
    fn index_of_never_assigns() {
        let mut ids: IndexMap<String> = IndexMap::new();
        ids.add("a".to_string());
        assert_eq!(ids.index_of("a"), Some(0));
        assert_eq!(ids.index_of("missing"), None);
        assert_eq!(ids.len(), 1, "lookup must not assign");
    }

    /// Invariant: Assigned indices for N distinct keys are exactly 0..N,
    /// even when every key lands in the same chain.
    #[test]
    fn dense_under_full_collision() {
        #[derive(Clone, Default)]
        struct ConstBuildHasher;
        struct ConstHasher;
        impl std::hash::BuildHasher for ConstBuildHasher {
            type Hasher = ConstHasher;
            fn build_hasher(&self) -> Self::Hasher {
                ConstHasher
            }
        }
        impl Hasher for ConstHasher {
            fn write(&mut self, _bytes: &[u8]) {}
            fn finish(&self) -> u64 {
                0
            }
        }

        let mut ids: IndexMap<u32, ConstBuildHasher> = IndexMap::with_hasher(ConstBuildHasher);
        for k in 0..50u32 {
            assert_eq!(ids.add(k), k as usize);
        }
        // Interleave re-adds; nothing shifts.
        for k in (0..50u32).rev() {
            assert_eq!(ids.add(k), k as usize);
        }
        assert_eq!(ids.len(), 50);
    }

    /// Invariant: `clear` forgets all assignments and numbering restarts
    /// from 0.
    #[test]
    fn clear_restarts_numbering() {
        let mut ids: IndexMap<String> = IndexMap::new();
        ids.add("a".to_string());
        ids.add("b".to_string());
        ids.clear();
        assert!(ids.is_empty());
        assert_eq!(ids.index_of("a"), None);
        assert_eq!(ids.add("b".to_string()), 0);
    }
}
