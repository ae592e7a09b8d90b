//! Error types for dpt-core.

use std::path::PathBuf;
use thiserror::Error;

/// A request rejected before any work was done.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("enter search criteria in at least one field (text query, image, or filters)")]
    EmptyRequest,
    #[error("watchlist name must not be empty")]
    EmptyWatchlistName,
}

/// A filing-date comparison that could not be made.
///
/// Raised per record; the filter pass excludes the record and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("record {record_id} has an unparseable filing date {value:?}")]
    FilingDate { record_id: String, value: String },
    #[error("date bound {value:?} is not a valid YYYY-MM-DD date")]
    Bound { value: String },
}

/// Failure of the key-value persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write store file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store file {path} is not a JSON object of strings")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize value for key {key:?}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure of a search-session operation.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no record with id {0:?}")]
    UnknownRecord(String),
    #[error("no history entry with id {0:?}")]
    UnknownHistoryEntry(String),
}

/// Failure of a watchlist operation.
#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no watchlist with id {0:?}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
