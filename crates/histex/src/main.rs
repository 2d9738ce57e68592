use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use histex_core::config::{DataLayout, RunConfig};
use histex_core::run;
use histex_core::sqlcmd::SqlcmdClient;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE: &str = "histex.log";

#[derive(Parser, Debug)]
#[command(author, version, about = "Export historian tag data to parquet", long_about = None)]
struct Cli {
    /// Root directory for exported artifacts
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logging().context("failed to set up logging")?;

    let config = RunConfig::from_env();
    let layout = DataLayout::new(cli.data_dir);
    let executor = SqlcmdClient::new();

    let summary = run::run(&executor, &config, &layout)?;

    if summary.failed() > 0 {
        warn!(
            failed = summary.failed(),
            "run finished with table export failures"
        );
    }
    info!(summary = %serde_json::to_string(&summary)?, "run summary");

    Ok(())
}

// One log stream, duplicated to stdout and a fixed-name file.
fn init_logging() -> Result<()> {
    let log_file =
        File::create(LOG_FILE).with_context(|| format!("failed to create {LOG_FILE}"))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(fmt::layer().with_ansi(false).with_writer(Arc::new(log_file)))
        .init();

    Ok(())
}
