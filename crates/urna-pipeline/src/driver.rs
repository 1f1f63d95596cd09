use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};
use tracing::{info, instrument};
use urna_catalog::Identifier;
use urna_fetch::HttpClient;

use crate::batch::partition;
use crate::error::Result;
use crate::orchestrator::BatchOrchestrator;
use crate::outcome::{BatchReport, ItemFailure};

/// Run-level settings.
#[derive(Clone)]
pub struct RunOptions {
    /// Items per batch, and so the bound on in-flight requests.
    ///
    /// Default: 100
    pub batch_size: usize,

    /// Called once per finished batch, before the next one starts.
    ///
    /// Default: None
    pub on_batch: Option<Arc<dyn Fn(&BatchReport) + Send + Sync>>,
}

impl fmt::Debug for RunOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunOptions")
            .field("batch_size", &self.batch_size)
            .field("on_batch", &"{ ... }")
            .finish()
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            batch_size: 100,
            on_batch: None,
        }
    }
}

impl RunOptions {
    #[must_use]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    #[must_use]
    pub fn on_batch(mut self, on_batch: Arc<dyn Fn(&BatchReport) + Send + Sync>) -> Self {
        self.on_batch = Some(on_batch);
        self
    }
}

/// Totals for a whole run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub batches: usize,
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub bytes_written: u64,
    pub failures: Vec<ItemFailure>,
    #[serde(rename = "elapsed_secs", serialize_with = "as_secs")]
    pub elapsed: Duration,
}

fn as_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

impl RunSummary {
    fn absorb(&mut self, report: BatchReport) {
        self.batches += 1;
        self.attempted += report.attempted;
        self.succeeded += report.succeeded();
        self.failed += report.failed();
        self.bytes_written += report.bytes_written();
        self.failures.extend(report.failures);
    }

    /// Mean wall-clock seconds per attempted item.
    pub fn secs_per_item(&self) -> Option<f64> {
        (self.attempted > 0).then(|| self.elapsed.as_secs_f64() / self.attempted as f64)
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Feeds batches to the orchestrator one at a time.
pub struct RunDriver<C: HttpClient> {
    orchestrator: BatchOrchestrator<C>,
    options: RunOptions,
}

impl<C: HttpClient> RunDriver<C> {
    pub fn new(orchestrator: BatchOrchestrator<C>, options: RunOptions) -> Self {
        Self {
            orchestrator,
            options,
        }
    }

    /// Fetch and persist every identifier.
    ///
    /// Configuration is checked and the output directory prepared before the
    /// first request; those are the only errors returned. Batch `k + 1`
    /// starts only after batch `k` has persisted everything it fetched.
    #[instrument(skip_all, fields(items = ids.len(), batch_size = self.options.batch_size))]
    pub async fn run(&self, ids: Vec<Identifier>) -> Result<RunSummary> {
        let batches = partition(ids, self.options.batch_size)?;
        self.orchestrator.store().ensure_dir().await?;

        let start = Instant::now();
        let mut summary = RunSummary::default();

        for batch in batches {
            let report = self.orchestrator.run_batch(batch).await;
            if let Some(ref callback) = self.options.on_batch {
                callback(&report);
            }
            summary.absorb(report);
        }

        summary.elapsed = start.elapsed();

        info!(
            batches = summary.batches,
            attempted = summary.attempted,
            succeeded = summary.succeeded,
            failed = summary.failed,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "run complete"
        );

        Ok(summary)
    }
}
