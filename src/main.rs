use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use epg_aggregator::{
    allowlist::ChannelAllowList, config::Config, ingestor::AggregationEngine, output::EpgWriter,
    sources::HttpContentFetcher,
};

#[derive(Parser)]
#[command(name = "epg-aggregator")]
#[command(version)]
#[command(about = "Aggregates remote XMLTV EPG sources into a single allow-list filtered guide")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Allow-list file path (overrides config file)
    #[arg(short, long, value_name = "FILE")]
    allowlist: Option<PathBuf>,

    /// Output XML path (overrides config file)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = format!("epg_aggregator={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting EPG aggregator v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration and apply CLI overrides
    let mut config = Config::load_from_file(&cli.config)?;
    if let Some(allowlist) = cli.allowlist {
        config.ingestion.allowlist_path = allowlist;
    }
    if let Some(output) = cli.output {
        config.storage.output_path = output;
    }

    let allow_list = ChannelAllowList::load(&config.ingestion.allowlist_path)?;
    info!(
        "Loaded {} channel identifiers from {}",
        allow_list.len(),
        config.ingestion.allowlist_path.display()
    );

    let fetcher = HttpContentFetcher::new(config.ingestion.connect_timeout);
    let engine = AggregationEngine::new(fetcher);
    let output = engine.run(&config.sources, &allow_list).await;

    EpgWriter::write(&output, &config.storage.output_path)?;
    if config.storage.write_compressed {
        EpgWriter::write_compressed(&output, &config.compressed_output_path())?;
    }

    Ok(())
}
