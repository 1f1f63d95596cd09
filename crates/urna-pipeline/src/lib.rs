//! Batched two-phase fetch-and-persist pipeline.
//!
//! Identifiers are split into fixed-size [`Batch`]es. Each batch runs three
//! phases (resolve, fetch, persist), every phase fanning out one call per item
//! and joining all of them before the next phase starts. Batches run strictly
//! one after another, so at most one batch's worth of requests is in flight.
//!
//! A failing item drops out of the later phases and is recorded as an
//! [`ItemFailure`]; it never aborts its batch or the run. Only configuration
//! problems detected before the first request are fatal.

mod batch;
mod driver;
mod error;
mod orchestrator;
mod outcome;

pub use batch::{Batch, partition};
pub use driver::{RunDriver, RunOptions, RunSummary};
pub use error::{PipelineError, Result};
pub use orchestrator::BatchOrchestrator;
pub use outcome::{BatchReport, FailureKind, ItemFailure, Outcome, Phase};
