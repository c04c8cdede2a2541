//! # DND Headlines
//!
//! Command-line front end that fetches the top headlines of one or more
//! News API sources and prints them as text, Markdown, or JSON.
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=YOUR_KEY dnd_headlines -s bbc-news -s reuters
//! ```
//!
//! ## Flow
//!
//! 1. **Configuration**: Load the optional YAML file and apply CLI overrides
//! 2. **Fetching**: One request per source, one at a time
//! 3. **Output**: Render all pages and write them to stdout or a file

use chrono::Utc;
use clap::Parser;
use dnd_headlines::cli::Cli;
use dnd_headlines::config::load_config;
use dnd_headlines::fetcher::{ArticleFetcher, build_request_url};
use dnd_headlines::models::HeadlinesPage;
use dnd_headlines::outputs::{render, write_output};
use dnd_headlines::sources::{NEWS_SOURCES, label_for};
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args.sources, ?args.format, ?args.config, "Parsed CLI arguments");

    if args.list_sources {
        for source in NEWS_SOURCES {
            println!("{:<26} {}", source.slug, source.label);
        }
        return Ok(());
    }

    let config = args.apply_to(load_config(args.config.as_deref()).await?);
    let Some(api_key) = config.api_key.clone() else {
        error!("No News API key configured (use --api-key, NEWS_API_KEY, or api_key in the config file)");
        return Err("missing News API key".into());
    };
    info!(endpoint = %config.endpoint, sources = config.sources.len(), "Configuration loaded");

    let fetcher = ArticleFetcher::with_options(config.fetcher_options())?;

    // ---- Fetch each source in turn ----
    let sources = config.sources.iter().unique().cloned().collect::<Vec<_>>();
    let pages: Vec<HeadlinesPage> = stream::iter(sources)
        .then(|source: String| {
            let fetcher = &fetcher;
            let url = build_request_url(&config.endpoint, &source, &api_key);
            async move {
                let articles = match fetcher.try_fetch(&url).await {
                    Ok(articles) => {
                        info!(%source, count = articles.len(), "Fetched headlines");
                        articles
                    }
                    Err(e) => {
                        warn!(%source, kind = %e.kind(), error = %e, "No headlines for source");
                        Vec::new()
                    }
                };
                HeadlinesPage {
                    label: label_for(&source).to_string(),
                    source,
                    fetched_at: Utc::now(),
                    articles,
                }
            }
        })
        .collect()
        .await;

    let total = pages.iter().map(|p| p.articles.len()).sum::<usize>();
    info!(pages = pages.len(), articles = total, "Fetching complete");

    // ---- Output ----
    let rendered = render(args.format, &pages, Utc::now())?;
    match &args.output {
        Some(path) => {
            if let Err(e) = write_output(path, &rendered).await {
                error!(path = %path.display(), error = %e, "Failed writing output");
                return Err(e);
            }
        }
        None => print!("{rendered}"),
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, millis = elapsed.as_millis() as u64, "Execution complete");

    Ok(())
}
