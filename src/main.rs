use anyhow::Context;
use clap::Parser;
use listing_scout::sink::{record_listing, JsonLinesSink};
use listing_scout::{FetchConfig, ListingScraper, Outcome, RightmoveScraper};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Extract a property listing from a Rightmove URL
#[derive(Debug, Parser)]
#[command(name = "listing-scout", version, about)]
struct Cli {
    /// Listing URL
    url: String,

    /// Per-attempt request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// User-Agent header sent with every request
    #[arg(long)]
    user_agent: Option<String>,

    /// Total attempts for transient HTTP statuses
    #[arg(long, default_value_t = 3)]
    max_attempts: u32,

    /// Append url, address, price and service charge to this JSON-lines file
    #[arg(long)]
    sink: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn fetch_config(&self) -> FetchConfig {
        let mut config = FetchConfig {
            timeout: Duration::from_secs(self.timeout),
            max_attempts: self.max_attempts,
            ..Default::default()
        };
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            let extraction_failed = e
                .downcast_ref::<listing_scout::ScrapeError>()
                .is_some_and(|e| e.is_extraction_failure());
            if extraction_failed {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let scraper = RightmoveScraper::with_config(cli.fetch_config())?;

    info!("Scraping {} listing: {}", scraper.source_name(), cli.url);
    let outcome = scraper.scrape(&cli.url).await?;

    if let (Outcome::Listing(record), Some(path)) = (&outcome, &cli.sink) {
        info!("Appending listing to {}", path.display());
        let sink = JsonLinesSink::new(path);
        record_listing(&sink, record).await;
    }

    let json = serde_json::to_string_pretty(&outcome).context("Failed to serialize outcome")?;
    println!("{}", json);

    Ok(())
}
