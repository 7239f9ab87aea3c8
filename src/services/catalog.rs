use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::models::{DataIntegrityError, PlaceRecord};

/// Errors that can occur while loading the place catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Data integrity error: {0}")]
    Integrity(#[from] DataIntegrityError),
}

/// Anything that can hand out the current place catalog
///
/// Implementations must return an independent snapshot on every call so
/// that concurrent recommendation passes never share annotations.
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> Result<Vec<PlaceRecord>, CatalogError>;
}

/// Catalog backed by a JSON array on disk, re-read on every load
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonFileCatalog {
    fn load(&self) -> Result<Vec<PlaceRecord>, CatalogError> {
        let bytes = std::fs::read(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;

        let values: Vec<serde_json::Value> =
            serde_json::from_slice(&bytes).map_err(|source| CatalogError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let records = values
            .iter()
            .map(PlaceRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!("Loaded {} catalog records from {}", records.len(), self.path.display());
        Ok(records)
    }
}

/// Immutable in-memory catalog
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    records: Arc<[PlaceRecord]>,
}

impl InMemoryCatalog {
    pub fn new(records: Vec<PlaceRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }
}

impl CatalogSource for InMemoryCatalog {
    fn load(&self) -> Result<Vec<PlaceRecord>, CatalogError> {
        Ok(self.records.to_vec())
    }
}
