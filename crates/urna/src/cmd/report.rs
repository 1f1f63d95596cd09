//! `urna report`: how much there is to download, per region.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tabled::Tabled;
use tracing::info;
use urna_catalog::{
    BATCHED_SECS_PER_UNIT, CatalogReader, CatalogSummary, SEQUENTIAL_SECS_PER_UNIT,
    projected_secs, summarize, total_units,
};

use crate::cli::ReportArgs;
use crate::config::Config;
use crate::ui::table::Formatter;

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Councils")]
    councils: usize,
    #[tabled(rename = "Ballot units")]
    ballot_units: usize,
}

/// Positional regions first, then the keys of `--regions-file`.
pub fn collect_regions(args: &ReportArgs) -> Result<Vec<String>> {
    let mut regions = args.regions.clone();

    if let Some(path) = &args.regions_file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading regions file {}", path.display()))?;
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&text)
            .with_context(|| format!("{} is not a JSON object", path.display()))?;
        regions.extend(map.into_iter().map(|(k, _)| k));
    }

    if regions.is_empty() {
        bail!("no regions given; pass region codes or --regions-file");
    }
    Ok(regions)
}

pub fn summaries(reader: &CatalogReader, regions: &[String]) -> Result<Vec<CatalogSummary>> {
    regions
        .iter()
        .map(|region| {
            reader
                .load(region)
                .map(|record| summarize(&record))
                .with_context(|| format!("loading catalog for {region}"))
        })
        .collect()
}

pub fn render(summaries: &[CatalogSummary]) -> String {
    let total = total_units(summaries);
    let sequential_days = projected_secs(total, SEQUENTIAL_SECS_PER_UNIT) / 86_400.0;
    let batched_hours = projected_secs(total, BATCHED_SECS_PER_UNIT) / 3_600.0;

    Formatter {
        header: None,
        footer: Some(format!(
            "{total} ballot units; ~{sequential_days:.0} days one at a time, ~{batched_hours:.0} hours batched"
        )),
    }
    .build(summaries.iter().map(|s| Row {
        region: s.region.clone(),
        councils: s.councils,
        ballot_units: s.ballot_units,
    }))
    .to_string()
}

pub fn write_json(path: &Path, summaries: &[CatalogSummary]) -> Result<()> {
    let json = serde_json::to_string_pretty(summaries)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

pub fn run(config: &Config, args: &ReportArgs) -> Result<()> {
    let regions = collect_regions(args)?;
    let reader = CatalogReader::new(&config.catalog_dir);
    let summaries = summaries(&reader, &regions)?;

    println!("{}", render(&summaries));

    if let Some(path) = &args.out {
        write_json(path, &summaries)?;
        info!(path = %path.display(), regions = summaries.len(), "report written");
    }
    Ok(())
}
