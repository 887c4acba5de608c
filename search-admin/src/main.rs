use std::error::Error as _;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use search_admin::commands::{self, Commands};
use search_admin::{AppSettings, CliError, Dependencies};
use search_admin_client::{IndexAdmin, LoggingConfig};

/// Administrative utilities for OpenSearch indexes and aliases.
#[derive(Parser)]
#[command(name = "search-admin")]
#[command(about = "Administrative utilities for OpenSearch indexes and aliases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the connections configuration file (JSON). Without it, a
    /// single default connection is read from OPENSEARCH_URL.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Named connection to use instead of the configured default
    #[arg(long, global = true)]
    connection: Option<String>,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);

            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("  Caused by: {}", err);
                source = err.source();
            }

            1
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<i32, CliError> {
    let settings = AppSettings::load(cli.config.as_deref())?;

    init_tracing(settings.logging_for(cli.connection.as_deref()));

    let deps = Dependencies::new(settings);
    let client = deps.manager.connection(cli.connection.as_deref()).await?;
    let admin = IndexAdmin::new(client);

    Ok(commands::run(cli.command, &admin).await)
}

/// Initialize tracing, preferring the selected connection's file target and
/// falling back to stderr filtered by RUST_LOG.
fn init_tracing(logging: Option<&LoggingConfig>) {
    if let Some((path, level)) = logging.and_then(LoggingConfig::file_target) {
        if let Ok(file) = OpenOptions::new().create(true).append(true).open(path) {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new(level))
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
