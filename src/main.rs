mod chunk;
mod config;
mod event;
mod extract;
mod fallback;
mod llm;
mod scrape;
mod sink;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "concert_scraper",
    about = "Scrape the NYC free summer concerts listing into a CSV"
)]
struct Cli {
    /// Listing page to scrape
    #[arg(long, default_value = config::DEFAULT_TARGET_URL)]
    url: String,

    /// Output CSV path (overwritten if present)
    #[arg(long, default_value = config::DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Read the page HTML from a local file instead of fetching
    #[arg(long)]
    input: Option<PathBuf>,

    /// Max characters per model request
    #[arg(long, default_value_t = config::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Model used for extraction
    #[arg(long, default_value = config::DEFAULT_MODEL)]
    model: String,

    /// Year assumed for listing dates, which carry none
    #[arg(long, default_value_t = config::DEFAULT_SEASON_YEAR)]
    year: i32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let api_key = match std::env::var("ANTHROPIC_API_KEY") {
        Ok(key) if !key.is_empty() => key,
        _ => {
            println!("Error: Please set the ANTHROPIC_API_KEY environment variable");
            println!("Export it like: export ANTHROPIC_API_KEY='your-api-key-here'");
            return Ok(());
        }
    };

    let cfg = Config::new(api_key, cli.url, cli.output, cli.model, cli.chunk_size, cli.year);

    let html = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => scrape::fetch_html(&cfg).await?,
    };

    let text = scrape::extract_text(&html);
    println!("Scraped {} characters of text", text.len());

    let chunks = chunk::split_into_chunks(&text, chunk::series_markers(), cfg.chunk_size);
    println!("Processing {} text chunks...", chunks.len());

    let client = llm::AnthropicClient::new(&cfg)?;
    let mut parsed = extract::extract_events(&client, &chunks, cfg.season_year).await;
    println!("Total events parsed: {}", parsed.len());

    if parsed.is_empty() {
        println!("No events found with the model, using fallback parsing");
        parsed = fallback::parse_events(&text, cfg.season_year);
        println!("Fallback parsing found {} events", parsed.len());
    }

    let unique = event::dedup_events(parsed);
    println!("Unique events: {}", unique.len());

    let events = event::normalize_events(unique);
    if events.is_empty() {
        println!("No events found - exiting");
        return Ok(());
    }

    sink::write_csv(&cfg.output_file, &events)?;
    sink::print_summary(&events, &cfg.output_file);

    Ok(())
}
