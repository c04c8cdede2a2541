//! YAML configuration for the headlines front end.
//!
//! Every key is optional; absent keys take the defaults below. Command-line
//! flags override whatever the file provides.
//!
//! ```yaml
//! endpoint: https://newsapi.org/v1/articles
//! api_key: YOUR_KEY
//! sources:
//!   - bbc-news
//!   - reuters
//! connect_timeout_secs: 15
//! read_timeout_secs: 10
//! log_errors: false
//! ```

use crate::error::ConfigError;
use crate::fetcher::{DEFAULT_ENDPOINT, ErrorLogging, FetcherOptions};
use crate::sources::DEFAULT_SOURCE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HeadlinesConfig {
    /// Base URL of the articles endpoint.
    pub endpoint: String,
    /// News API key sent as the `apiKey` query parameter.
    pub api_key: Option<String>,
    /// Source slugs to fetch, in order.
    pub sources: Vec<String>,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    /// Report collapsed fetch failures with `warn!`.
    pub log_errors: bool,
}

impl Default for HeadlinesConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            sources: vec![DEFAULT_SOURCE.to_string()],
            connect_timeout_secs: 15,
            read_timeout_secs: 10,
            log_errors: false,
        }
    }
}

impl HeadlinesConfig {
    /// Options for building an [`ArticleFetcher`](crate::fetcher::ArticleFetcher).
    pub fn fetcher_options(&self) -> FetcherOptions {
        FetcherOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            read_timeout: Duration::from_secs(self.read_timeout_secs),
            error_logging: if self.log_errors {
                ErrorLogging::Warn
            } else {
                ErrorLogging::Silent
            },
        }
    }
}

/// Load configuration from `path`, or the defaults when no path is given.
///
/// # Arguments
///
/// * `path` - YAML file to read; keys it omits keep their defaults
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file cannot be read and
/// [`ConfigError::Yaml`] when it is not valid YAML for [`HeadlinesConfig`].
#[instrument(level = "debug", skip_all, fields(path = ?path))]
pub async fn load_config(path: Option<&Path>) -> Result<HeadlinesConfig, ConfigError> {
    let Some(path) = path else {
        debug!("No config file given; using defaults");
        return Ok(HeadlinesConfig::default());
    };

    let text = fs::read_to_string(path).await.map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_config(text: &str) -> Result<HeadlinesConfig, serde_yaml::Error> {
    // An empty document deserializes as unit, not as an empty mapping
    if text.trim().is_empty() {
        return Ok(HeadlinesConfig::default());
    }
    serde_yaml::from_str(text)
}
