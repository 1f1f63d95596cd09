use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;

#[derive(Clone, Debug, Parser)]
#[command(name = "urna", version = env!("CARGO_PKG_VERSION"), about = "Download published ballot-unit files in batches", long_about = None, propagate_version = true)]
pub struct App {
    /// Config file (default: ./urna.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "f", name = "fetch", about = "Fetch every ballot unit of a region")]
    Fetch(FetchArgs),
    #[command(alias = "r", name = "report", about = "Count ballot units per region")]
    Report(ReportArgs),
}

#[derive(Clone, Debug, Args)]
pub struct FetchArgs {
    /// Region code, e.g. RR
    pub region: String,

    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Only process the first N ballot units
    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub catalog_dir: Option<PathBuf>,

    #[arg(long)]
    pub base_url: Option<String>,

    /// Write the run summary, including every failure, as JSON
    #[arg(long)]
    pub summary_json: Option<PathBuf>,

    #[arg(long)]
    pub no_progress: bool,

    /// Exit non-zero if any ballot unit failed
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ReportArgs {
    /// Region codes
    pub regions: Vec<String>,

    /// JSON object whose keys are region codes, read in file order
    #[arg(long)]
    pub regions_file: Option<PathBuf>,

    #[arg(long)]
    pub catalog_dir: Option<PathBuf>,

    /// Write the per-region summaries as JSON
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

impl App {
    pub fn overrides(&self) -> Overrides {
        let mut overrides = Overrides {
            log_level: self.log_level.clone(),
            ..Overrides::default()
        };
        match &self.cmd {
            Commands::Fetch(args) => {
                overrides.batch_size = args.batch_size;
                overrides.output_dir = args.output.clone();
                overrides.catalog_dir = args.catalog_dir.clone();
                overrides.base_url = args.base_url.clone();
            }
            Commands::Report(args) => {
                overrides.catalog_dir = args.catalog_dir.clone();
            }
        }
        overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_flags_become_overrides() {
        let app = App::parse_from([
            "urna", "fetch", "RR", "-b", "20", "--output", "out", "--log-level", "debug",
        ]);
        let overrides = app.overrides();

        assert_eq!(overrides.batch_size, Some(20));
        assert_eq!(overrides.output_dir, Some(PathBuf::from("out")));
        assert_eq!(overrides.log_level.as_deref(), Some("debug"));
        assert!(overrides.base_url.is_none());

        match app.cmd {
            Commands::Fetch(args) => {
                assert_eq!(args.region, "RR");
                assert!(!args.strict);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn report_accepts_many_regions() {
        let app = App::parse_from(["urna", "r", "RR", "AP", "--out", "states_reports.json"]);
        match app.cmd {
            Commands::Report(args) => {
                assert_eq!(args.regions, vec!["RR", "AP"]);
                assert_eq!(args.out, Some(PathBuf::from("states_reports.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        App::command().debug_assert();
    }
}
