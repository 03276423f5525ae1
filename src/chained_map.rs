//! ChainedHashMap: fixed-bucket-count map with separate chaining.

use crate::owned::OwnedHandle;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;
use slotmap::{DefaultKey, SlotMap};
use std::collections::hash_map::RandomState;

/// Bucket count substituted when a constructor is given a count below 1.
pub const DEFAULT_BUCKET_COUNT: usize = 512;

/// One chain cell: a key/value pair and the slot of its chain successor.
#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    next: Option<DefaultKey>,
}

/// A hash map with a bucket count fixed at construction and separate
/// chaining for collision resolution.
///
/// Nodes live in a single contiguous `SlotMap`; each bucket holds the slot
/// of its chain head, and each node holds the slot of its successor. The
/// bucket array never grows, so lookups degrade to a chain scan once the
/// entry count passes the bucket count. Callers who know their cardinality
/// should size the table up front via [`ChainedHashMap::with_bucket_count`].
pub struct ChainedHashMap<K, V, S = RandomState> {
    hasher: S,
    buckets: Box<[Option<DefaultKey>]>,
    nodes: SlotMap<DefaultKey, Node<K, V>>,
}

impl<K, V> ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    /// A map with [`DEFAULT_BUCKET_COUNT`] buckets.
    pub fn new() -> Self {
        Self::with_bucket_count(DEFAULT_BUCKET_COUNT)
    }

    /// A map with `bucket_count` buckets. Counts below 1 are replaced by
    /// [`DEFAULT_BUCKET_COUNT`]. The count is fixed for the map's lifetime.
    pub fn with_bucket_count(bucket_count: usize) -> Self {
        Self::with_bucket_count_and_hasher(bucket_count, RandomState::default())
    }
}

impl<K, V> Default for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_bucket_count_and_hasher(DEFAULT_BUCKET_COUNT, hasher)
    }

    pub fn with_bucket_count_and_hasher(bucket_count: usize, hasher: S) -> Self {
        let bucket_count = if bucket_count < 1 {
            DEFAULT_BUCKET_COUNT
        } else {
            bucket_count
        };
        Self {
            hasher,
            buckets: vec![None; bucket_count].into_boxed_slice(),
            nodes: SlotMap::with_key(),
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The fixed bucket count chosen at construction.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn bucket_index<Q>(&self, q: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        (self.hasher.hash_one(q) % self.buckets.len() as u64) as usize
    }

    // Chain scan. Every key reachable from a bucket head is live in `nodes`,
    // so indexing cannot miss.
    fn find_in_bucket<Q>(&self, bucket: usize, q: &Q) -> Option<DefaultKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut cur = self.buckets[bucket];
        while let Some(slot) = cur {
            let node = &self.nodes[slot];
            if node.key.borrow() == q {
                return Some(slot);
            }
            cur = node.next;
        }
        None
    }

    fn prepend(&mut self, bucket: usize, key: K, value: V) -> DefaultKey {
        let next = self.buckets[bucket];
        let slot = self.nodes.insert(Node { key, value, next });
        self.buckets[bucket] = Some(slot);
        slot
    }

    /// Upsert: overwrite in place if `key` is present (returning the old
    /// value), otherwise prepend a new node to the key's bucket chain.
    /// A key never occupies more than one node.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let bucket = self.bucket_index(&key);
        if let Some(slot) = self.find_in_bucket(bucket, &key) {
            return Some(mem::replace(&mut self.nodes[slot].value, value));
        }
        self.prepend(bucket, key, value);
        None
    }

    /// Existing value for `key`, or the one produced by `default`, freshly
    /// inserted. `default` runs only on a miss.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let bucket = self.bucket_index(&key);
        let slot = match self.find_in_bucket(bucket, &key) {
            Some(slot) => slot,
            None => {
                let value = default();
                self.prepend(bucket, key, value)
            }
        };
        &mut self.nodes[slot].value
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let bucket = self.bucket_index(q);
        self.find_in_bucket(bucket, q).map(|slot| &self.nodes[slot].value)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let bucket = self.bucket_index(q);
        self.find_in_bucket(bucket, q)
            .map(|slot| &mut self.nodes[slot].value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let bucket = self.bucket_index(q);
        self.find_in_bucket(bucket, q).is_some()
    }

    /// Unlink and drop the entry for `q`. Absent keys are a silent no-op
    /// (`None`), never an error.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let bucket = self.bucket_index(q);
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.buckets[bucket];
        while let Some(slot) = cur {
            if self.nodes[slot].key.borrow() == q {
                let next = self.nodes[slot].next;
                match prev {
                    Some(p) => self.nodes[p].next = next,
                    None => self.buckets[bucket] = next,
                }
                return self.nodes.remove(slot).map(|node| node.value);
            }
            prev = cur;
            cur = self.nodes[slot].next;
        }
        None
    }

    /// Drop every entry. The bucket array is retained; the map stays usable
    /// at its original bucket count.
    pub fn clear(&mut self) {
        for head in self.buckets.iter_mut() {
            *head = None;
        }
        self.nodes.clear();
    }

    /// Like [`clear`](Self::clear), but first releases the external resource
    /// each value owns. Only available when `V` is an [`OwnedHandle`], so the
    /// non-owning case is rejected at compile time rather than left to caller
    /// discipline.
    pub fn release_all(&mut self)
    where
        V: OwnedHandle,
    {
        for head in self.buckets.iter_mut() {
            *head = None;
        }
        for (_, node) in self.nodes.drain() {
            node.value.release();
        }
    }
}
