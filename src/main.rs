use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use webseek::config::Config;
use webseek::crawler::{FetcherSettings, HttpFetcher};
use webseek::engine::{self, CrawlEvent, CrawlOptions};
use webseek::models::SearchStatus;

#[derive(Parser)]
#[command(
    name = "webseek",
    version,
    about = "Bounded concurrent web crawler that searches pages for a text fragment",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    /// Optional TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl from a seed URL, searching page bodies for a text fragment
    Crawl {
        /// Seed URL (http:// only)
        #[arg(short, long)]
        url: String,

        /// Text fragment to search for (exact substring match)
        #[arg(short, long)]
        text: String,

        /// Number of concurrent fetch workers
        #[arg(short, long)]
        workers: Option<usize>,

        /// Maximum number of pages to visit
        #[arg(short, long)]
        max_pages: Option<usize>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Rate limit in requests per second
        #[arg(long)]
        rate_limit: Option<u32>,

        /// Result output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One human-readable line per result
    Text,
    /// One JSON object per result (JSON lines)
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env(),
    };

    match cli.command {
        Commands::Crawl {
            url,
            text,
            workers,
            max_pages,
            timeout_secs,
            rate_limit,
            output,
        } => {
            let mut config = config;
            if let Some(workers) = workers {
                config.crawler.max_workers = workers;
            }
            if let Some(max_pages) = max_pages {
                config.crawler.max_pages = max_pages;
            }
            if let Some(timeout_secs) = timeout_secs {
                config.crawler.request_timeout_secs = timeout_secs;
            }
            if let Some(rate_limit) = rate_limit {
                config.crawler.rate_limit = Some(rate_limit);
            }
            config.validate().context("Invalid configuration")?;

            crawl(config, url, text, output).await?;
        }
    }

    Ok(())
}

async fn crawl(config: Config, url: String, text: String, output: OutputFormat) -> Result<()> {
    let fetcher = HttpFetcher::with_settings(FetcherSettings {
        timeout: config.request_timeout(),
        rate_limit: config.crawler.rate_limit.and_then(NonZeroU32::new),
        user_agent: config.crawler.user_agent.clone(),
    })
    .context("Failed to create HTTP fetcher")?;

    let (events_tx, mut events_rx) = engine::event_channel();
    let handle = engine::start(
        CrawlOptions {
            seed: url,
            workers: config.crawler.clamped_workers(),
            max_pages: config.crawler.max_pages,
            search_text: text,
        },
        Arc::new(fetcher),
        events_tx,
    )
    .context("Failed to start crawl")?;

    let started_at = Instant::now();
    let mut found = 0u64;
    let mut not_found = 0u64;
    let mut failed = 0u64;
    let mut stopping = false;

    loop {
        tokio::select! {
            maybe_event = events_rx.recv() => {
                let Some(event) = maybe_event else { break };
                match event {
                    CrawlEvent::TaskStarted { url } => {
                        tracing::info!(url = %url, "task started");
                    }
                    CrawlEvent::Result(result) => {
                        match result.status {
                            SearchStatus::Found => found += 1,
                            SearchStatus::NotFound => not_found += 1,
                            SearchStatus::Failed => failed += 1,
                            SearchStatus::InProgress => {}
                        }
                        match output {
                            OutputFormat::Text => {
                                println!(
                                    "{}  {}",
                                    result.status.label(result.http_code),
                                    result.url
                                );
                            }
                            OutputFormat::Json => {
                                println!("{}", serde_json::to_string(&result)?);
                            }
                        }
                    }
                    CrawlEvent::Paused => {
                        tracing::info!("crawl paused");
                    }
                    CrawlEvent::Finished => break,
                }
            }
            _ = tokio::signal::ctrl_c(), if !stopping => {
                tracing::info!("interrupt received; stopping crawl");
                handle.stop();
                stopping = true;
            }
        }
    }

    let elapsed = started_at.elapsed();
    tracing::info!(
        found,
        not_found,
        failed,
        elapsed_ms = elapsed.as_millis() as u64,
        "crawl summary"
    );
    eprintln!(
        "visited {} pages in {:.1}s: {found} found, {not_found} without match, {failed} failed",
        found + not_found + failed,
        elapsed.as_secs_f64(),
    );

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("webseek=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("webseek=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    Ok(())
}
