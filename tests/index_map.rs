use chained_map::IndexMap;

/// Invariant: The canonical assigner scenario — first sight assigns the
/// next unused index, re-adds are idempotent.
#[test]
fn first_sight_assignment() {
    let mut ids: IndexMap<String> = IndexMap::new();
    assert_eq!(ids.add("x".to_string()), 0);
    assert_eq!(ids.add("y".to_string()), 1);
    assert_eq!(ids.add("x".to_string()), 0);
    assert_eq!(ids.add("z".to_string()), 2);
    assert_eq!(ids.len(), 3);
}

/// Invariant: Across many keys and interleaved re-adds, the n-th distinct
/// key holds index n-1 and the map never grows on a re-add.
#[test]
fn indices_stay_dense_and_stable() {
    let mut ids: IndexMap<u64> = IndexMap::with_bucket_count(32);
    for k in 0..1000u64 {
        assert_eq!(ids.add(k * 7919), k as usize);
        if k > 0 {
            // Re-add an earlier key; its index must be unchanged.
            assert_eq!(ids.add((k / 2) * 7919), (k / 2) as usize);
            assert_eq!(ids.len(), k as usize + 1);
        }
    }
    assert_eq!(ids.len(), 1000);
    for k in 0..1000u64 {
        assert_eq!(ids.index_of(&(k * 7919)), Some(k as usize));
    }
}

/// Invariant: Borrowed lookup works on the assigner (store `String`, query
/// with `&str`).
#[test]
fn borrowed_lookup() {
    let mut ids: IndexMap<String> = IndexMap::new();
    ids.add("hello".to_string());
    assert_eq!(ids.index_of("hello"), Some(0));
    assert!(ids.contains_key("hello"));
    assert_eq!(ids.index_of("world"), None);
    assert!(!ids.contains_key("world"));
}

/// Invariant: A zero bucket count falls back to the table default, same as
/// for the underlying map.
#[test]
fn zero_bucket_count_falls_back() {
    let ids: IndexMap<String> = IndexMap::with_bucket_count(0);
    assert_eq!(
        ids.bucket_count(),
        IndexMap::<String>::new().bucket_count()
    );
}
