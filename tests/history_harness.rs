#![allow(unused)]
//! Search history integration harness.
//!
//! # What this covers
//!
//! - **Deduplication**: re-running the same (query, criteria, mode) leaves a
//!   single entry, at the front, with the newest result count.
//! - **Eviction**: the log never exceeds ten entries; the oldest goes first.
//! - **Remove / clear**: removing an unknown id is a no-op; clear empties.
//! - **Persistence**: every mutation is visible to a fresh log loaded from the
//!   same store, in a temp file as well as in memory.
//! - **Recovery**: missing or corrupt stored data loads as an empty log.
//! - **Property: len == min(n, 10)** for n distinct searches.
//!
//! # Running
//!
//! ```sh
//! cargo test --test history_harness
//! ```

mod common;
use chrono::{TimeZone, Utc};
use common::*;
use dpt_core::{
    FileStore, FilterCriteria, KeyValueStore, MemoryStore, RecordStatus, SearchHistory,
    SearchMode, HISTORY_KEY, MAX_HISTORY_ENTRIES,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

// ---------------------------------------------------------------------------
// Deduplication
// ---------------------------------------------------------------------------

#[test]
fn identical_search_keeps_only_newest_at_front() {
    let mut history = SearchHistory::load(MemoryStore::new());
    let first = history.add(basic_search("chair", 1)).unwrap();
    history.add(basic_search("lamp", 0)).unwrap();
    let again = history.add(basic_search("chair", 3)).unwrap();

    assert_history_queries!(history, ["chair", "lamp"]);
    assert_eq!(history.entries()[0].id, again.id);
    assert_eq!(history.entries()[0].result_count, 3);
    assert!(history.get(&first.id).is_none());
}

#[test]
fn criteria_compare_structurally() {
    let mut history = SearchHistory::load(MemoryStore::new());
    history
        .add(advanced_search("", by_status(RecordStatus::Granted)))
        .unwrap();
    // A separately built but equal criteria value is the same search.
    history
        .add(advanced_search("", by_status(RecordStatus::Granted)))
        .unwrap();
    assert_eq!(history.len(), 1);

    history
        .add(advanced_search("", by_status(RecordStatus::Pending)))
        .unwrap();
    assert_eq!(history.len(), 2);
}

// ---------------------------------------------------------------------------
// Eviction
// ---------------------------------------------------------------------------

#[test]
fn eleventh_entry_evicts_the_first() {
    let mut history = SearchHistory::load(MemoryStore::new());
    for i in 1..=11 {
        history.add(basic_search(&format!("q{i}"), i)).unwrap();
    }
    assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
    assert_eq!(history.entries()[0].query, "q11");
    assert_eq!(history.entries()[9].query, "q2");
    assert!(history.entries().iter().all(|e| e.query != "q1"));
}

#[test]
fn timestamps_are_kept_as_given() {
    let mut history = SearchHistory::load(MemoryStore::new());
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let entry = history.add_at(basic_search("watch", 1), at).unwrap();
    assert_eq!(entry.timestamp, at);
}

// ---------------------------------------------------------------------------
// Remove / clear
// ---------------------------------------------------------------------------

#[test]
fn remove_unknown_id_is_a_no_op() {
    let mut history = SearchHistory::load(MemoryStore::new());
    history.add(basic_search("a", 1)).unwrap();
    history.add(basic_search("b", 1)).unwrap();
    let before = history.entries().to_vec();

    assert!(!history.remove("does-not-exist").unwrap());
    assert_eq!(history.entries(), before.as_slice());
}

#[test]
fn remove_and_clear() {
    let mut history = SearchHistory::load(MemoryStore::new());
    let a = history.add(basic_search("a", 1)).unwrap();
    history.add(basic_search("b", 1)).unwrap();

    assert!(history.remove(&a.id).unwrap());
    assert_history_queries!(history, ["b"]);

    history.clear().unwrap();
    assert!(history.is_empty());
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn every_mutation_is_persisted() {
    let store = MemoryStore::new();
    let mut history = SearchHistory::load(store.clone());

    let a = history.add(basic_search("a", 1)).unwrap();
    history.add(advanced_search("b", by_country("JP"))).unwrap();
    assert_history_queries!(SearchHistory::load(store.clone()), ["b", "a"]);

    history.remove(&a.id).unwrap();
    assert_history_queries!(SearchHistory::load(store.clone()), ["b"]);

    history.clear().unwrap();
    assert!(SearchHistory::load(store).is_empty());
}

#[test]
fn file_store_round_trip_preserves_entries() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("store.json"));

    let mut history = SearchHistory::load(store.clone());
    let criteria = FilterCriteria {
        inventor: Some("smith".into()),
        ..filed_between(Some("2024-01-01"), None)
    };
    history.add(advanced_search("phone", criteria)).unwrap();
    history.add(basic_search("chair", 1)).unwrap();

    let reloaded = SearchHistory::load(FileStore::new(dir.path().join("store.json")));
    assert_eq!(reloaded.entries(), history.entries());
    assert_eq!(reloaded.entries()[1].mode, SearchMode::Advanced);
}

// ---------------------------------------------------------------------------
// Recovery
// ---------------------------------------------------------------------------

#[test]
fn missing_key_loads_empty() {
    assert!(SearchHistory::load(MemoryStore::new()).is_empty());
}

#[rstest]
#[case(CORRUPT_HISTORY[0])]
#[case(CORRUPT_HISTORY[1])]
#[case(CORRUPT_HISTORY[2])]
#[case(CORRUPT_HISTORY[3])]
#[case(CORRUPT_HISTORY[4])]
fn corrupt_data_loads_empty(#[case] raw: &str) {
    let store = MemoryStore::new();
    store.set(HISTORY_KEY, raw).unwrap();
    assert!(SearchHistory::load(store).is_empty());
}

#[test]
fn corrupt_store_file_loads_empty_and_next_write_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{{{{").unwrap();

    let mut history = SearchHistory::load(FileStore::new(&path));
    assert!(history.is_empty());

    history.add(basic_search("chair", 1)).unwrap();
    let reloaded = SearchHistory::load(FileStore::new(&path));
    assert_history_queries!(reloaded, ["chair"]);

    history.clear().unwrap();
    assert!(SearchHistory::load(FileStore::new(&path)).is_empty());
}

// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_len_is_min_n_and_capacity(n in 0usize..40) {
        let mut history = SearchHistory::load(MemoryStore::new());
        for i in 0..n {
            history.add(basic_search(&format!("q{i}"), i)).unwrap();
        }
        prop_assert_eq!(history.len(), n.min(MAX_HISTORY_ENTRIES));
        if n > 0 {
            prop_assert_eq!(history.entries()[0].query.clone(), format!("q{}", n - 1));
        }
    }

    #[test]
    fn prop_no_duplicate_triples(queries in proptest::collection::vec("[abc]{0,2}", 0..30)) {
        let mut history = SearchHistory::load(MemoryStore::new());
        for q in &queries {
            history.add(basic_search(q, 0)).unwrap();
        }
        let mut seen = std::collections::HashSet::new();
        for e in history.entries() {
            prop_assert!(seen.insert(e.query.clone()), "duplicate entry for {:?}", e.query);
        }
    }
}
