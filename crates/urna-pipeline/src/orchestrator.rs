use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use futures_util::future::join_all;
use tracing::{info, instrument, warn};
use urna_catalog::Identifier;
use urna_fetch::{ArtifactFetcher, Endpoints, FetchOptions, HashResolver, HttpClient};
use urna_store::ArtifactStore;

use crate::batch::Batch;
use crate::outcome::{BatchReport, ItemFailure, Outcome, Phase};

/// Runs one batch through resolve, fetch and persist.
///
/// The HTTP client is shared by both request phases and by every batch the
/// orchestrator handles, so connections are reused for the whole run.
pub struct BatchOrchestrator<C: HttpClient> {
    resolver: HashResolver<C>,
    fetcher: ArtifactFetcher<C>,
    store: ArtifactStore,
}

impl<C: HttpClient> BatchOrchestrator<C> {
    pub fn new(
        client: Arc<C>,
        endpoints: Endpoints,
        options: FetchOptions,
        store: ArtifactStore,
    ) -> Self {
        Self {
            resolver: HashResolver::new(Arc::clone(&client), endpoints.clone(), options),
            fetcher: ArtifactFetcher::new(client, endpoints),
            store,
        }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Process every item of `batch`. Never fails: per-item errors end up in
    /// the report.
    ///
    /// Each phase joins all of its calls before the next phase starts.
    #[instrument(skip_all, fields(batch = batch.index, items = batch.len()))]
    pub async fn run_batch(&self, batch: Batch) -> BatchReport {
        let start = Instant::now();
        let attempted = batch.len();
        let position: HashMap<Identifier, usize> = batch
            .ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        let mut failures = Vec::new();

        let resolved = join_all(batch.ids.into_iter().map(|id| async move {
            self.resolver
                .resolve(id)
                .await
                .map_err(|e| ItemFailure::from_fetch(Phase::Resolve, e))
        }))
        .await;
        let resolved = keep_successes(resolved, &mut failures);

        let fetched = join_all(resolved.into_iter().map(|(id, token)| async move {
            self.fetcher
                .fetch(id, token)
                .await
                .map_err(|e| ItemFailure::from_fetch(Phase::Fetch, e))
        }))
        .await;
        let fetched = keep_successes(fetched, &mut failures);

        let written = join_all(fetched.iter().map(|(id, body)| async move {
            self.store
                .write(id, body)
                .await
                .map_err(|e| ItemFailure::from_store(id, e))
        }))
        .await;
        let mut written = keep_successes(written, &mut failures);

        let rank = |id: &Identifier| position.get(id).copied().unwrap_or(usize::MAX);
        written.sort_by_key(|w| rank(&w.id));
        failures.sort_by_key(|f| rank(&f.id));

        let report = BatchReport {
            index: batch.index,
            attempted,
            written,
            failures,
            elapsed: start.elapsed(),
        };

        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "batch complete"
        );

        report
    }
}

/// Fan-in: split one phase's outcomes into the survivors and the failures.
fn keep_successes<T>(outcomes: Vec<Outcome<T>>, failures: &mut Vec<ItemFailure>) -> Vec<T> {
    let mut survivors = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            Ok(value) => survivors.push(value),
            Err(failure) => {
                warn!(
                    id = %failure.id,
                    phase = %failure.phase,
                    "{}",
                    failure.message
                );
                failures.push(failure);
            }
        }
    }
    survivors
}
