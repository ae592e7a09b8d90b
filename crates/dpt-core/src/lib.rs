//! dpt-core: DesignPatTrack core library.
//!
//! This crate holds the search pipeline for design-patent records plus the
//! state that surrounds it.
//!
//! # Architecture
//!
//! ```text
//! RecordSource ──► SearchSession ──► filter ──► score
//!                       │
//!                       └──► SearchHistory ──► KeyValueStore
//!                                                 ▲
//!                 Watchlists ─────────────────────┘
//! ```
//!
//! Everything is synchronous and single-threaded. Stores and records are
//! passed in by the caller; nothing here is global.

pub mod config;
pub mod error;
pub mod filter;
pub mod history;
pub mod score;
pub mod search;
pub mod stats;
pub mod store;
pub mod types;
pub mod watchlist;

pub use error::{DateError, SearchError, StoreError, ValidationError, WatchlistError};
pub use filter::{filter, filter_with_report, FilterReport};
pub use history::{HistoryEntry, NewHistoryEntry, SearchHistory, HISTORY_KEY, MAX_HISTORY_ENTRIES};
pub use search::{SearchOutcome, SearchRequest, SearchSession};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use types::{DateRange, FilterCriteria, Record, RecordStatus, SearchMode};
pub use watchlist::{Watchlist, WatchlistStatus, Watchlists, WATCHLISTS_KEY};
