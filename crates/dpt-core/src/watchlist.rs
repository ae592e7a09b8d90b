//! Watchlists: named, user-curated collections of records.
//!
//! Persisted the same way as the search history: the full list is written to
//! the store under [`WATCHLISTS_KEY`] after every mutation, and unreadable
//! data loads as an empty collection.

use crate::error::{StoreError, ValidationError, WatchlistError};
use crate::store::KeyValueStore;
use crate::types::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store key the watchlists are persisted under.
pub const WATCHLISTS_KEY: &str = "designpattrack_watchlists";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchlistStatus {
    #[default]
    Active,
    Draft,
    Archived,
}

impl std::fmt::Display for WatchlistStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WatchlistStatus::Active => "active",
            WatchlistStatus::Draft => "draft",
            WatchlistStatus::Archived => "archived",
        };
        f.pad(name)
    }
}

impl std::str::FromStr for WatchlistStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(WatchlistStatus::Active),
            "draft" => Ok(WatchlistStatus::Draft),
            "archived" => Ok(WatchlistStatus::Archived),
            other => Err(format!("unknown watchlist status: {other} (expected active|draft|archived)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Watchlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Records in the order they were added.
    #[serde(default, rename = "patents")]
    pub records: Vec<Record>,
    #[serde(default)]
    pub status: WatchlistStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Watchlist {
    pub fn contains(&self, record_id: &str) -> bool {
        self.records.iter().any(|r| r.id == record_id)
    }
}

#[derive(Debug)]
pub struct Watchlists<S> {
    store: S,
    lists: Vec<Watchlist>,
}

impl<S: KeyValueStore> Watchlists<S> {
    /// Rehydrate from `store`; unreadable data yields no watchlists.
    pub fn load(store: S) -> Self {
        let lists = match store.get(WATCHLISTS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "watchlists: stored data is corrupt, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!(error = %e, "watchlists: failed to read store, starting empty");
                Vec::new()
            }
        };
        Self { store, lists }
    }

    pub fn list(&self) -> &[Watchlist] {
        &self.lists
    }

    pub fn get(&self, id: &str) -> Option<&Watchlist> {
        self.lists.iter().find(|w| w.id == id)
    }

    /// Create an empty, active watchlist. The name is trimmed and must not be
    /// blank.
    pub fn create(&mut self, name: &str, description: &str) -> Result<Watchlist, WatchlistError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyWatchlistName.into());
        }
        let list = Watchlist {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.trim().to_string(),
            records: Vec::new(),
            status: WatchlistStatus::Active,
            created_at: Utc::now(),
            tags: Vec::new(),
        };
        tracing::debug!(id = %list.id, name = %list.name, "watchlists: created");
        self.lists.push(list.clone());
        self.persist()?;
        Ok(list)
    }

    /// Append `record` to the watchlist. Returns `false` if it was already
    /// there, in which case nothing changes.
    pub fn add_record(&mut self, id: &str, record: Record) -> Result<bool, WatchlistError> {
        let list = self.get_mut(id)?;
        if list.contains(&record.id) {
            return Ok(false);
        }
        tracing::debug!(watchlist = id, record = %record.id, "watchlists: record added");
        list.records.push(record);
        self.persist()?;
        Ok(true)
    }

    /// Remove a record from the watchlist. Returns whether it was present.
    pub fn remove_record(&mut self, id: &str, record_id: &str) -> Result<bool, WatchlistError> {
        let list = self.get_mut(id)?;
        let before = list.records.len();
        list.records.retain(|r| r.id != record_id);
        let removed = list.records.len() != before;
        if removed {
            tracing::debug!(watchlist = id, record = record_id, "watchlists: record removed");
            self.persist()?;
        }
        Ok(removed)
    }

    pub fn set_status(&mut self, id: &str, status: WatchlistStatus) -> Result<(), WatchlistError> {
        self.get_mut(id)?.status = status;
        self.persist()?;
        Ok(())
    }

    /// Attach a tag; blank and duplicate tags are ignored.
    pub fn add_tag(&mut self, id: &str, tag: &str) -> Result<(), WatchlistError> {
        let tag = tag.trim();
        let list = self.get_mut(id)?;
        if tag.is_empty() || list.tags.iter().any(|t| t == tag) {
            return Ok(());
        }
        list.tags.push(tag.to_string());
        self.persist()?;
        Ok(())
    }

    /// Delete the watchlist with `id`.
    pub fn delete(&mut self, id: &str) -> Result<Watchlist, WatchlistError> {
        let idx = self
            .lists
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| WatchlistError::NotFound(id.to_string()))?;
        let removed = self.lists.remove(idx);
        tracing::debug!(id, "watchlists: deleted");
        self.persist()?;
        Ok(removed)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Watchlist, WatchlistError> {
        self.lists
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| WatchlistError::NotFound(id.to_string()))
    }

    fn persist(&self) -> Result<(), StoreError> {
        let body = serde_json::to_string(&self.lists).map_err(|source| StoreError::Serialize {
            key: WATCHLISTS_KEY.to_string(),
            source,
        })?;
        self.store.set(WATCHLISTS_KEY, &body)
    }
}
