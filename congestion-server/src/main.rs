// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Congestion — slowest route in a municipal traffic dataset
//
//  serve:  report page over HTTP, one fetch + log append per view
//  check:  a single cycle from the command line
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use anyhow::Context;
use clap::{Parser, Subcommand};
use congestion_core::AppConfig;
use congestion_fetch::{DatasetSource, FileSource, HttpSource};
use congestion_observability::FindingLog;
use congestion_report::{ReportState, run_cycle, server};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "congestion", version, about = "Finds the slowest route in a traffic congestion dataset")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "congestion.yaml", global = true)]
    config: PathBuf,

    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Dataset URL (overrides `dataset.url`)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Finding log path (overrides `log.path`)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the report page
    Serve {
        /// Listen address (overrides `server.addr`)
        #[arg(long)]
        addr: Option<String>,
    },
    /// Run one cycle and print the logged entry
    Check {
        /// Read the dataset from a saved JSON file instead of the URL
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── Tracing ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // ── Config ──
    // Env overrides apply with or without the file.
    if cli.config.exists() {
        info!(path = %cli.config.display(), "Loading config file");
    } else {
        info!(path = %cli.config.display(), "No config file found, using defaults and environment");
    }
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(url) = cli.url {
        config.dataset.url = url;
    }
    if let Some(path) = cli.log_file {
        config.log.path = path;
    }
    config.validate()?;

    let log = Arc::new(
        FindingLog::new(&config.log.path)
            .with_context(|| format!("opening finding log {}", config.log.path.display()))?
            .with_zone(config.log.zone()?),
    );

    match cli.command {
        Command::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| config.server.addr.clone());
            let source: Arc<dyn DatasetSource> = Arc::new(HttpSource::new(&config.dataset)?);
            info!(
                version = env!("CARGO_PKG_VERSION"),
                dataset = %config.dataset.url,
                log = %config.log.path.display(),
                timezone = %config.log.timezone,
                "Congestion report server starting"
            );
            server::serve(&addr, Arc::new(ReportState::new(source, log))).await
        }
        Command::Check { file } => {
            let source: Box<dyn DatasetSource> = match file {
                Some(path) => Box::new(FileSource::new(path)),
                None => Box::new(HttpSource::new(&config.dataset)?),
            };
            let outcome = run_cycle(source.as_ref(), &log).await?;
            println!("{}", outcome.entry);
            println!("{}", outcome.report.display.metric_clause);
            Ok(())
        }
    }
}
