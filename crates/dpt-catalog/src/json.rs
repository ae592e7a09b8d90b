//! JSON file catalog: a file holding one array of records.

use crate::{check_unique_ids, CatalogError, RecordSource};
use dpt_core::Record;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonCatalog {
    fn load(&self) -> Result<Vec<Record>, CatalogError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Read {
            path: self.path.clone(),
            source,
        })?;
        let records: Vec<Record> = serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: self.path.clone(),
            source,
        })?;
        check_unique_ids(&records)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "catalog: json loaded");
        Ok(records)
    }
}
