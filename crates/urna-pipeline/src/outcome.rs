use std::fmt;
use std::time::Duration;

use serde::Serialize;
use urna_catalog::Identifier;
use urna_fetch::FetchError;
use urna_store::{StoreError, Written};

/// Steps every item goes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Resolve,
    Fetch,
    Persist,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Resolve => write!(f, "resolve"),
            Phase::Fetch => write!(f, "fetch"),
            Phase::Persist => write!(f, "persist"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Network,
    HttpStatus,
    Parse,
    Write,
}

/// Why one item stopped, and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub id: Identifier,
    pub phase: Phase,
    pub kind: FailureKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
}

impl ItemFailure {
    pub fn from_fetch(phase: Phase, err: FetchError) -> Self {
        let message = err.to_string();
        match err {
            FetchError::Network { id, .. } => Self {
                id,
                phase,
                kind: FailureKind::Network,
                status: None,
                message,
            },
            FetchError::HttpStatus { id, status, .. } => Self {
                id,
                phase,
                kind: FailureKind::HttpStatus,
                status: Some(status),
                message,
            },
            FetchError::Parse { id, .. } => Self {
                id,
                phase,
                kind: FailureKind::Parse,
                status: None,
                message,
            },
        }
    }

    pub fn from_store(id: &Identifier, err: StoreError) -> Self {
        Self {
            id: id.clone(),
            phase: Phase::Persist,
            kind: FailureKind::Write,
            status: None,
            message: err.to_string(),
        }
    }
}

/// Result of one item in one phase.
pub type Outcome<T> = Result<T, ItemFailure>;

/// Everything that happened to one batch.
///
/// `written` and `failures` are each in the batch's input order.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub index: usize,
    pub attempted: usize,
    pub written: Vec<Written>,
    pub failures: Vec<ItemFailure>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.written.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn bytes_written(&self) -> u64 {
        self.written.iter().map(|w| w.bytes).sum()
    }

    pub fn failures_in(&self, phase: Phase) -> impl Iterator<Item = &ItemFailure> {
        self.failures.iter().filter(move |f| f.phase == phase)
    }
}
