//! Search history: a bounded, deduplicated, most-recent-first log of the
//! searches a user ran, persisted through a [`KeyValueStore`].
//!
//! The whole list is serialized to JSON under [`HISTORY_KEY`] after every
//! mutation and read back once by [`SearchHistory::load`]. Missing or
//! unreadable data loads as an empty log; it is logged, never returned.
//!
//! # Invariants
//!
//! - Entries are ordered newest first.
//! - At most [`MAX_HISTORY_ENTRIES`] entries are kept; the oldest are dropped.
//! - No two entries share the same (query, criteria, mode) triple. Criteria
//!   are compared field by field.

use crate::error::StoreError;
use crate::store::KeyValueStore;
use crate::types::{FilterCriteria, SearchMode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store key the history list is persisted under.
pub const HISTORY_KEY: &str = "designpattrack_search_history";

/// Upper bound on the number of retained entries.
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// One recorded search action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub query: String,
    #[serde(default, rename = "filters")]
    pub criteria: FilterCriteria,
    pub result_count: usize,
    #[serde(rename = "searchType")]
    pub mode: SearchMode,
}

/// What a caller supplies to [`SearchHistory::add`]; id and timestamp are
/// assigned on insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistoryEntry {
    pub query: String,
    pub criteria: FilterCriteria,
    pub result_count: usize,
    pub mode: SearchMode,
}

impl HistoryEntry {
    fn same_search(&self, other: &HistoryEntry) -> bool {
        self.query == other.query && self.criteria == other.criteria && self.mode == other.mode
    }

    /// One-line human summary of what was searched for, e.g.
    /// `Text: "chair", Status: granted, Date: 2024-01-01 to Any`.
    pub fn describe(&self) -> String {
        let c = &self.criteria;
        let mut parts = Vec::new();

        if !self.query.is_empty() {
            parts.push(format!("Text: \"{}\"", self.query));
        }
        let labelled = [
            ("Organization", c.organization.as_deref()),
            ("Category", c.category.as_deref()),
            ("Country", c.country.as_deref()),
            ("Inventor", c.inventor.as_deref()),
            ("Number", c.external_id.as_deref()),
        ];
        // Fixed order: status, then the text fields, then the date window.
        if let Some(status) = c.status {
            parts.push(format!("Status: {status}"));
        }
        for (label, value) in labelled {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                parts.push(format!("{label}: {v}"));
            }
        }
        if let Some(range) = c.date_range.as_ref().filter(|r| !r.is_empty()) {
            let from = range.from.as_deref().filter(|v| !v.is_empty()).unwrap_or("Any");
            let to = range.to.as_deref().filter(|v| !v.is_empty()).unwrap_or("Any");
            parts.push(format!("Date: {from} to {to}"));
        }

        if parts.is_empty() {
            "Empty search".to_string()
        } else {
            parts.join(", ")
        }
    }
}

// ---------------------------------------------------------------------------
// SearchHistory
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct SearchHistory<S> {
    store: S,
    entries: Vec<HistoryEntry>,
}

impl<S: KeyValueStore> SearchHistory<S> {
    /// Rehydrate the log from `store`. Never fails: missing, corrupt or
    /// unreadable data yields an empty log. Entries are decoded one at a
    /// time, so a single malformed entry drops only itself.
    pub fn load(store: S) -> Self {
        let entries = match store.get(HISTORY_KEY) {
            Ok(Some(raw)) => decode_entries(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!(error = %e, "history: failed to read store, starting empty");
                Vec::new()
            }
        };
        Self { store, entries }
    }

    /// Record a search at the current time. See [`SearchHistory::add_at`].
    pub fn add(&mut self, entry: NewHistoryEntry) -> Result<HistoryEntry, StoreError> {
        self.add_at(entry, Utc::now())
    }

    /// Record a search with an explicit timestamp.
    ///
    /// Any existing entry for the same (query, criteria, mode) is removed, the
    /// new entry goes to the front, and the log is cut back to
    /// [`MAX_HISTORY_ENTRIES`]. The in-memory log keeps the new entry even
    /// when persisting it fails.
    pub fn add_at(
        &mut self,
        entry: NewHistoryEntry,
        timestamp: DateTime<Utc>,
    ) -> Result<HistoryEntry, StoreError> {
        let entry = HistoryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp,
            query: entry.query,
            criteria: entry.criteria,
            result_count: entry.result_count,
            mode: entry.mode,
        };

        let before = self.entries.len();
        self.entries.retain(|existing| !existing.same_search(&entry));
        let replaced = before - self.entries.len();
        self.entries.insert(0, entry.clone());
        self.entries.truncate(MAX_HISTORY_ENTRIES);

        tracing::debug!(
            id = %entry.id,
            mode = %entry.mode,
            results = entry.result_count,
            replaced,
            len = self.entries.len(),
            "history: entry added"
        );
        self.persist()?;
        Ok(entry)
    }

    /// Drop every entry.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        tracing::debug!("history: cleared");
        self.persist()
    }

    /// Drop the entry with `id`. Returns whether one was found.
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        tracing::debug!(id, removed, "history: remove");
        self.persist()?;
        Ok(removed)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let body = serde_json::to_string(&self.entries).map_err(|source| StoreError::Serialize {
            key: HISTORY_KEY.to_string(),
            source,
        })?;
        self.store.set(HISTORY_KEY, &body).inspect_err(|e| {
            tracing::error!(error = %e, "history: failed to persist");
        })
    }
}

fn decode_entries(raw: &str) -> Vec<HistoryEntry> {
    let values = match serde_json::from_str::<Vec<serde_json::Value>>(raw) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!(error = %e, "history: stored data is corrupt, starting empty");
            return Vec::new();
        }
    };
    let mut entries: Vec<HistoryEntry> = values
        .into_iter()
        .filter_map(|value| {
            serde_json::from_value(value)
                .inspect_err(|e| tracing::warn!(error = %e, "history: skipping malformed entry"))
                .ok()
        })
        .collect();
    entries.truncate(MAX_HISTORY_ENTRIES);
    tracing::debug!(count = entries.len(), "history: loaded");
    entries
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::{DateRange, RecordStatus};
    use pretty_assertions::assert_eq;

    fn search(query: &str) -> NewHistoryEntry {
        NewHistoryEntry {
            query: query.to_string(),
            criteria: FilterCriteria::default(),
            result_count: 1,
            mode: SearchMode::Basic,
        }
    }

    #[test]
    fn describe_lists_every_present_field() {
        let mut history = SearchHistory::load(MemoryStore::new());
        let entry = history
            .add(NewHistoryEntry {
                query: "chair".into(),
                criteria: FilterCriteria {
                    status: Some(RecordStatus::Granted),
                    country: Some("US".into()),
                    date_range: Some(DateRange::new(Some("2024-01-01".into()), None)),
                    ..Default::default()
                },
                result_count: 0,
                mode: SearchMode::Advanced,
            })
            .unwrap();
        assert_eq!(
            entry.describe(),
            "Text: \"chair\", Status: granted, Country: US, Date: 2024-01-01 to Any"
        );
    }

    #[test]
    fn describe_uses_fixed_field_order() {
        let mut history = SearchHistory::load(MemoryStore::new());
        let entry = history
            .add(NewHistoryEntry {
                query: String::new(),
                criteria: FilterCriteria {
                    external_id: Some("USD9".into()),
                    inventor: Some("Chen".into()),
                    category: Some("D6-334".into()),
                    organization: Some("FurniturePlus".into()),
                    status: Some(RecordStatus::Pending),
                    ..Default::default()
                },
                result_count: 0,
                mode: SearchMode::Advanced,
            })
            .unwrap();
        assert_eq!(
            entry.describe(),
            "Status: pending, Organization: FurniturePlus, Category: D6-334, Inventor: Chen, Number: USD9"
        );
    }

    #[test]
    fn describe_empty_search() {
        let mut history = SearchHistory::load(MemoryStore::new());
        let entry = history.add(search("")).unwrap();
        assert_eq!(entry.describe(), "Empty search");
    }

    #[test]
    fn same_query_different_mode_is_kept() {
        let mut history = SearchHistory::load(MemoryStore::new());
        history.add(search("lamp")).unwrap();
        history
            .add(NewHistoryEntry {
                mode: SearchMode::Advanced,
                ..search("lamp")
            })
            .unwrap();
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn loads_legacy_browser_format() {
        let store = MemoryStore::new();
        store
            .set(
                HISTORY_KEY,
                r#"[{"id":"1717000000000","timestamp":"2024-05-29T16:26:40.000Z","query":"watch",
                    "filters":{"applicant":"WearableTech"},"resultCount":1,"searchType":"advanced"}]"#,
            )
            .unwrap();
        let history = SearchHistory::load(store);
        assert_eq!(history.len(), 1);
        let entry = &history.entries()[0];
        assert_eq!(entry.criteria.organization.as_deref(), Some("WearableTech"));
        assert_eq!(entry.mode, SearchMode::Advanced);
    }

    #[test]
    fn blank_legacy_filters_load_alongside_other_entries() {
        let store = MemoryStore::new();
        store
            .set(
                HISTORY_KEY,
                r#"[{"id":"2","timestamp":"2024-05-30T09:00:00.000Z","query":"chair",
                     "filters":{"status":"","applicant":""},"resultCount":2,"searchType":"basic"},
                    {"id":"1","timestamp":"2024-05-29T16:26:40.000Z","query":"watch",
                     "filters":{"status":"granted"},"resultCount":1,"searchType":"advanced"}]"#,
            )
            .unwrap();
        let history = SearchHistory::load(store);
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].criteria.status, None);
        assert_eq!(history.entries()[1].criteria.status, Some(RecordStatus::Granted));
    }

    #[test]
    fn one_malformed_entry_drops_only_itself() {
        let store = MemoryStore::new();
        store
            .set(
                HISTORY_KEY,
                r#"[{"id":"2","query":"no timestamp"},
                    {"id":"1","timestamp":"2024-05-29T16:26:40.000Z","query":"watch",
                     "filters":{},"resultCount":1,"searchType":"basic"}]"#,
            )
            .unwrap();
        let history = SearchHistory::load(store);
        assert_eq!(history.len(), 1);
        assert_eq!(history.entries()[0].query, "watch");
    }

    #[test]
    fn oversized_stored_list_is_truncated_on_load() {
        let store = MemoryStore::new();
        let mut history = SearchHistory::load(store.clone());
        for i in 0..MAX_HISTORY_ENTRIES {
            history.add(search(&format!("q{i}"))).unwrap();
        }
        let mut raw: Vec<HistoryEntry> =
            serde_json::from_str(&store.get(HISTORY_KEY).unwrap().unwrap()).unwrap();
        raw.extend(raw.clone());
        store.set(HISTORY_KEY, &serde_json::to_string(&raw).unwrap()).unwrap();

        assert_eq!(SearchHistory::load(store).len(), MAX_HISTORY_ENTRIES);
    }
}
