mod collect;
mod fetch;
mod query;
mod render;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use ratewatch_core::AppConfig;
use ratewatch_scraper::{ExtractionInput, SignalExtractor};
use tracing_subscriber::EnvFilter;

use crate::collect::Collector;

#[derive(Debug, Parser)]
#[command(name = "ratewatch-cli")]
#[command(about = "Hotel rate and availability intelligence")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract rate and availability from a saved page
    Extract {
        /// Page content: HTML, markdown, or plain text
        file: PathBuf,

        /// Hotel name used to anchor the rate search; inferred when omitted
        #[arg(long)]
        hotel: Option<String>,

        /// URL the page was fetched from, used to infer the hotel name
        #[arg(long)]
        url: Option<String>,

        /// Print the signal as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch and compare rates for every configured hotel
    Collect {
        /// Number of stay dates to collect, starting today
        #[arg(long)]
        days: Option<u32>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ratewatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract {
            file,
            hotel,
            url,
            json,
        } => run_extract(&config, &file, hotel.as_deref(), url.as_deref(), json),
        Commands::Collect { days, json } => run_collect(&config, days, json).await,
    }
}

fn run_extract(
    config: &AppConfig,
    file: &Path,
    hotel: Option<&str>,
    url: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let mut input = ExtractionInput::new(&content, hotel.unwrap_or_default());
    if let Some(url) = url {
        input = input.with_source_url(url);
    }

    let report = SignalExtractor::new(&config.thresholds)?.extract_detailed(&input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let signal = report.clone().into_signal();
    println!("hotel:        {}", report.hotel_name.as_deref().unwrap_or("(unknown)"));
    match report.rate {
        Some(hit) => println!("rate:         ${} ({})", hit.amount_usd, hit.strategy),
        None => println!("rate:         n/a"),
    }
    println!("availability: {}", signal.availability);
    if !signal.notes.is_empty() {
        println!("notes:        {}", signal.notes_display());
    }
    Ok(())
}

async fn run_collect(config: &AppConfig, days: Option<u32>, json: bool) -> anyhow::Result<()> {
    let hotels = ratewatch_core::load_hotels(&config.hotels_path)?;
    let days = days.unwrap_or(config.days_ahead);
    if days == 0 {
        anyhow::bail!("--days must be at least 1");
    }

    let start = chrono::Local::now().date_naive();
    tracing::info!(
        env = %config.env,
        hotels = hotels.hotels.len(),
        competitors = hotels.competitors().count(),
        days,
        %start,
        "starting rate collection"
    );

    let collector = Collector::new(config)?;
    let records = collector.collect(&hotels, start, days).await;

    if json {
        println!(
            "{}",
            render::render_json(&records, &hotels, config.opportunity_margin_usd)?
        );
    } else {
        print!(
            "{}",
            render::render_table(&records, &hotels, config.opportunity_margin_usd)?
        );
    }

    tracing::info!(records = records.len(), "rate collection complete");
    Ok(())
}
