//! chained-map: a single-threaded hash map with a bucket count fixed at
//! construction and separate chaining for collisions, plus an index
//! assigner that hands out dense sequential ids for distinct keys.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small associative container whose capacity and collision
//!   behavior are fully under the caller's control, with one derived
//!   structure layered on its public surface.
//! - Layers:
//!   - ChainedHashMap<K, V, S>: fixed bucket array plus a contiguous
//!     slotmap node store; buckets and chain links are slotmap keys, not
//!     pointers, so the whole structure is safe Rust and drops without
//!     chain recursion.
//!   - IndexMap<K, S>: holds a ChainedHashMap<K, usize, S> and adds the
//!     "first sight of a key assigns the next unused index" policy via
//!     `get_or_insert_with`; it never touches table internals.
//!
//! Constraints
//! - Bucket count is chosen at construction (default 512; counts below 1
//!   fall back to the default) and never changes. There is no rehashing
//!   and no load-factor response: past `bucket_count` entries, lookups
//!   degrade linearly with chain length. Size the table for the expected
//!   cardinality up front.
//! - Single-threaded: no internal locking or atomics; callers serialize
//!   access to an instance.
//! - Hashing is fixed per instance: the `BuildHasher` supplied (or
//!   `RandomState`) is used unchanged for the map's lifetime.
//! - Within a bucket, new nodes are prepended; chain order carries no
//!   meaning for callers.
//!
//! Bulk release
//! - `release_all` empties the map and releases the external resource each
//!   value owns. It is bounded on the `OwnedHandle` capability trait, so
//!   value types that own nothing cannot reach it; `clear` is the plain
//!   drop-everything path.
//!
//! Notes and non-goals
//! - No iteration over entries.
//! - No probing strategies other than chaining.
//! - Absent keys are `Option::None` on lookup and a silent no-op on
//!   removal, never errors; the public API has no `Result` in it.

mod chained_map;
mod chained_map_proptest;
mod index_map;
mod owned;

// Public surface
pub use chained_map::{ChainedHashMap, DEFAULT_BUCKET_COUNT};
pub use index_map::IndexMap;
pub use owned::OwnedHandle;
