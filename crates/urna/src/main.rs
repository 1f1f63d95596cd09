use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use urna::cli::{App, Commands};
use urna::config::Config;
use urna::{cmd, logging};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let app = App::parse();
    let config = Config::load(app.config.as_deref(), &app.overrides())
        .context("loading configuration")?;
    logging::init(&config.log_level);

    match &app.cmd {
        Commands::Fetch(args) => {
            let summary = cmd::fetch::run(&config, args).await?;
            if args.strict && !summary.is_clean() {
                warn!(failed = summary.failed, "run finished with failures");
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Report(args) => cmd::report::run(&config, args)?,
    }
    Ok(ExitCode::SUCCESS)
}
