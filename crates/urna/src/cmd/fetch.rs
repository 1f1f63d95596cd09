//! `urna fetch`: download and store every ballot unit of a region.

use std::fs;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use urna_catalog::{CatalogReader, Identifier};
use urna_fetch::{HttpClient, ReqwestClient};
use urna_pipeline::{BatchOrchestrator, BatchReport, RunDriver, RunOptions, RunSummary};
use urna_store::ArtifactStore;

use crate::cli::FetchArgs;
use crate::config::Config;
use crate::ui::tracker::{BatchTrackerBuilder, Tracker};

/// Catalog identifiers for the region, truncated to `limit`.
pub fn load_identifiers(config: &Config, region: &str, limit: Option<usize>) -> Result<Vec<Identifier>> {
    let reader = CatalogReader::new(&config.catalog_dir);
    let mut ids = reader
        .identifiers(region)
        .with_context(|| format!("loading catalog for {region}"))?;
    if let Some(limit) = limit {
        ids.truncate(limit);
    }
    Ok(ids)
}

/// Run the pipeline over `ids` with an already built client.
pub async fn fetch_all<C: HttpClient>(
    client: Arc<C>,
    config: &Config,
    ids: Vec<Identifier>,
    label: &str,
    show_progress: bool,
) -> Result<RunSummary> {
    let orchestrator = BatchOrchestrator::new(
        client,
        config.endpoints()?,
        config.fetch_options(),
        ArtifactStore::new(&config.output_dir),
    );

    let tracker = BatchTrackerBuilder::default()
        .with_len(ids.len() as u64)
        .with_prefix(label)
        .hidden(!show_progress)
        .build();

    let options = RunOptions::default()
        .batch_size(config.batch_size)
        .on_batch({
            let tracker = tracker.clone();
            Arc::new(move |report: &BatchReport| {
                tracker.step(report);
            })
        });

    let summary = RunDriver::new(orchestrator, options).run(ids).await?;
    tracker.finish_with(&summary);
    Ok(summary)
}

pub fn print_summary(summary: &RunSummary) {
    println!("Time elapsed: {:.2}s", summary.elapsed.as_secs_f64());
    println!("Total ballots downloaded: {}", summary.succeeded);
    if summary.failed > 0 {
        println!("Failed: {}", summary.failed);
        for failure in &summary.failures {
            println!("  {} [{}] {}", failure.id, failure.phase, failure.message);
        }
    }
    if let Some(avg) = summary.secs_per_item() {
        println!("Average time per ballot: {avg:.3}s");
    }
}

pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

pub async fn run(config: &Config, args: &FetchArgs) -> Result<RunSummary> {
    config.validate()?;
    let ids = load_identifiers(config, &args.region, args.limit)?;
    info!(region = %args.region, units = ids.len(), "catalog loaded");

    let client = Arc::new(ReqwestClient::new(&config.fetch_options())?);
    let show_progress = !args.no_progress && std::io::stderr().is_terminal();
    let summary = fetch_all(client, config, ids, &args.region, show_progress).await?;

    print_summary(&summary);
    if let Some(path) = &args.summary_json {
        write_summary(path, &summary)?;
    }
    Ok(summary)
}
