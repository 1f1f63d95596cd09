//! Fatal errors: anything here stops the run before a request is made.

use thiserror::Error;
use urna_store::StoreError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid configuration: {0}")]
    OutputDir(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
