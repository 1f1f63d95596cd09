use urna_catalog::Identifier;

use crate::error::{PipelineError, Result};

/// An ordered slice of the run, processed through all phases together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Position of this batch in the run, from zero.
    pub index: usize,
    pub ids: Vec<Identifier>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Split `ids` into batches of `size`, keeping order. The last batch holds
/// the remainder and may be smaller.
///
/// An empty input yields no batches.
pub fn partition(ids: Vec<Identifier>, size: usize) -> Result<Vec<Batch>> {
    if size == 0 {
        return Err(PipelineError::InvalidConfiguration(
            "batch size must be at least 1".to_string(),
        ));
    }

    let mut batches = Vec::with_capacity(ids.len().div_ceil(size));
    let mut rest = ids.into_iter().peekable();

    while rest.peek().is_some() {
        batches.push(Batch {
            index: batches.len(),
            ids: rest.by_ref().take(size).collect(),
        });
    }

    Ok(batches)
}
