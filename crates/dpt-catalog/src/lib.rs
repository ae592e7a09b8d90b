//! dpt-catalog: record sources for dpt.
//!
//! Each source hands a complete collection of [`dpt_core::Record`] values to
//! the search session. There is no paging; sources load everything at once.

pub mod json;
pub mod sample;

pub use json::JsonCatalog;
pub use sample::SampleCatalog;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog {path} is not a JSON array of records")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog contains duplicate record id {0:?}")]
    DuplicateId(String),
}

/// Trait implemented by each record source.
pub trait RecordSource {
    fn load(&self) -> Result<Vec<dpt_core::Record>, CatalogError>;
}

/// Ids must be unique for watchlists and history re-runs to resolve records.
pub(crate) fn check_unique_ids(records: &[dpt_core::Record]) -> Result<(), CatalogError> {
    let mut seen = std::collections::HashSet::new();
    for r in records {
        if !seen.insert(r.id.as_str()) {
            return Err(CatalogError::DuplicateId(r.id.clone()));
        }
    }
    Ok(())
}
