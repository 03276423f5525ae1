#![cfg(test)]

// Property tests for ChainedHashMap and IndexMap kept inside the crate, in
// model-based state-machine form against std::collections::HashMap.

use crate::chained_map::ChainedHashMap;
use crate::index_map::IndexMap;
use proptest::prelude::*;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hasher};

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    GetOrInsert(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Clear,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::GetOrInsert(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Get),
            prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_state_machine<S>(
    mut sut: ChainedHashMap<Key, i32, S>,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError>
where
    S: BuildHasher,
{
    let mut model: HashMap<Key, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = key_from(&pool, i);
                let old = sut.insert(k.clone(), v);
                let mold = model.insert(k, v);
                prop_assert_eq!(old, mold, "upsert must return the prior value");
            }
            OpI::GetOrInsert(i, v) => {
                let k = key_from(&pool, i);
                let already = model.get(&k).copied();
                let got = *sut.get_or_insert_with(k.clone(), || v);
                match already {
                    Some(existing) => prop_assert_eq!(got, existing, "hit keeps stored value"),
                    None => {
                        prop_assert_eq!(got, v, "miss inserts the default");
                        model.insert(k, v);
                    }
                }
            }
            OpI::Remove(i) => {
                let k = key_from(&pool, i);
                prop_assert_eq!(sut.remove(&k), model.remove(&k));
            }
            OpI::Get(i) => {
                let k = key_from(&pool, i);
                prop_assert_eq!(sut.get(&k), model.get(&k));
            }
            OpI::Contains(s) => {
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(sut.contains_key(s.as_str()), has_model);
            }
            OpI::Mutate(i, d) => {
                let k = key_from(&pool, i);
                match (sut.get_mut(&k), model.get_mut(&k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (None, None) => {}
                    _ => prop_assert!(false, "presence mismatch in get_mut"),
                }
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap
// across random operation sequences, with the default per-instance hasher
// and the default bucket count.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(ChainedHashMap::new(), pool, ops)?;
    }
}

// Property: Same equivalence with a bucket count far below the key pool's
// cardinality, forcing multi-node chains on nearly every operation.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_tiny_table((pool, ops) in arb_scenario()) {
        run_state_machine(ChainedHashMap::with_bucket_count(2), pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress chain unlinking and
// equality resolution inside a single bucket.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
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

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(ChainedHashMap::with_hasher(ConstBuildHasher), pool, ops)?;
    }
}

// Property: IndexMap assigns dense first-sight indices. For any sequence of
// adds, a key's index equals the number of distinct keys seen strictly
// before its first add, and re-adds return the same index.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_index_map_dense_assignment(keys in proptest::collection::vec("[a-z]{0,4}", 1..80)) {
        let mut ids: IndexMap<String> = IndexMap::with_bucket_count(4);
        let mut model: HashMap<String, usize> = HashMap::new();

        for k in keys {
            let expected = *model.entry(k.clone()).or_insert_with(|| ids.len());
            prop_assert_eq!(ids.add(k.clone()), expected);
            prop_assert_eq!(ids.index_of(k.as_str()), Some(expected));
            prop_assert_eq!(ids.len(), model.len());
        }

        // Indices are exactly 0..N.
        let mut seen: Vec<usize> = model.values().copied().collect();
        seen.sort_unstable();
        let expected: Vec<usize> = (0..model.len()).collect();
        prop_assert_eq!(seen, expected);
    }
}
