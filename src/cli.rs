//! Command-line interface definitions for the headlines front end.
//!
//! Flags override the YAML config file; the API key and endpoint can also
//! come from the environment.

use crate::config::HeadlinesConfig;
use crate::outputs::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Fetch top headlines from the News API.
///
/// # Examples
///
/// ```sh
/// # Default source (Google News), key from the environment
/// NEWS_API_KEY=YOUR_KEY dnd_headlines
///
/// # Two sources as Markdown into a file
/// dnd_headlines -k YOUR_KEY -s bbc-news -s reuters -f markdown -o ./headlines.md
///
/// # Show the known sources
/// dnd_headlines --list-sources
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// News source slug to fetch (repeatable)
    #[arg(short, long = "source", value_name = "SLUG")]
    pub sources: Vec<String>,

    /// News API key
    #[arg(short = 'k', long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Articles endpoint base URL
    #[arg(short, long, env = "NEWS_API_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Optional path to config.yaml file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the rendered headlines to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the known news sources and exit
    #[arg(long)]
    pub list_sources: bool,

    /// Log each failed fetch from the fetcher itself
    #[arg(long)]
    pub log_errors: bool,
}

impl Cli {
    /// Layer the command-line values over a loaded config.
    pub fn apply_to(&self, mut config: HeadlinesConfig) -> HeadlinesConfig {
        if !self.sources.is_empty() {
            config.sources = self.sources.clone();
        }
        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if self.log_errors {
            config.log_errors = true;
        }
        config
    }
}
