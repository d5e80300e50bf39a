use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use siterisk_core::{load_app_config, load_sources, Address, SourceCache};
use siterisk_report::ReportBuilder;

#[derive(Debug, Parser)]
#[command(name = "siterisk")]
#[command(about = "Property risk and infrastructure report generator")]
struct Cli {
    /// Output machine-readable compact JSON instead of pretty-printed.
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the full report for one address and print it as JSON.
    Report {
        /// Street address line, e.g. "6 English Place".
        #[arg(long)]
        address_line: String,
        #[arg(long)]
        suburb: String,
        #[arg(long)]
        state: String,
        #[arg(long)]
        postcode: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            address_line,
            suburb,
            state,
            postcode,
        } => {
            let catalog = load_sources(&config.sources_path)?;
            let cache = Arc::new(SourceCache::new(config.cache_ttl()));
            let builder = ReportBuilder::new(config, catalog, cache)?;

            let address = Address::new(&address_line, &suburb, &state, &postcode);
            let report = builder.build_report(&address).await;

            let output = if cli.compact {
                serde_json::to_string(&report)?
            } else {
                serde_json::to_string_pretty(&report)?
            };
            println!("{output}");
        }
    }

    Ok(())
}
