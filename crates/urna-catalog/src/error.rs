//! Error types for urna-catalog.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Any failure to load or interpret a catalog.
///
/// Every variant is fatal for a run: no batch starts without a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog unavailable: cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("catalog unavailable: malformed catalog {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog unavailable: {origin} has no region record")]
    MissingRegion { origin: String },
}

impl CatalogError {
    pub(crate) fn parse(origin: impl Into<String>, source: serde_json::Error) -> Self {
        CatalogError::Parse {
            origin: origin.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
