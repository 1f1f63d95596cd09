use std::io;
use std::path::PathBuf;

use urna_catalog::Identifier;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write {path} for {id}: {source}")]
    Write {
        id: Identifier,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot prepare output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;
