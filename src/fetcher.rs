//! News API article fetching.
//!
//! This module turns a request URL into a list of [`ArticleRecord`]s:
//! compose the URL with [`build_request_url`], issue one bounded-timeout GET,
//! and parse the `"articles"` array of the response.
//!
//! # Architecture
//!
//! - [`ArticleFetcher`]: Owns the HTTP client and the timeouts
//! - [`ArticleSource`]: Seam the [`FeedController`](crate::controller::FeedController)
//!   fetches through, so controllers can be driven by something other than
//!   the network
//! - [`parse_articles`]: The network-free parsing half
//!
//! # Failure semantics
//!
//! [`ArticleFetcher::try_fetch`] reports every failure as a [`FetchError`].
//! [`ArticleFetcher::fetch`] collapses them into an empty list, so callers
//! of the plain contract only ever see "articles" or "no data". Nothing is
//! retried.

use crate::error::{FetchError, ParseError};
use crate::models::{ArticleRecord, NULL_SENTINEL};
use crate::utils::{looks_truncated, redact_api_key, truncate_for_log};
use reqwest::StatusCode;
use serde_json::{Map, Value};
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};
use url::Url;

/// The News API v1 articles endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://newsapi.org/v1/articles";

/// Compose a request URL with `source` and `apiKey` query parameters.
///
/// Values are percent-encoded; the source slug is otherwise forwarded
/// verbatim. A base that already carries a query string is extended with `&`.
/// A fragment on the base is kept after the new query, since anything placed
/// behind `#` never reaches the server.
///
/// # Arguments
///
/// * `base` - The articles endpoint, e.g. [`DEFAULT_ENDPOINT`]
/// * `source` - News source slug such as `bbc-news`
/// * `api_key` - News API key
///
/// # Returns
///
/// The request URL as a string. No validation is done here; a malformed base
/// is reported later by [`ArticleFetcher::try_fetch`].
///
/// # Examples
///
/// ```
/// use dnd_headlines::fetcher::build_request_url;
///
/// assert_eq!(
///     build_request_url("https://newsapi.org/v1/articles", "bbc-news", "KEY123"),
///     "https://newsapi.org/v1/articles?source=bbc-news&apiKey=KEY123"
/// );
/// ```
pub fn build_request_url(base: &str, source: &str, api_key: &str) -> String {
    let (head, fragment) = match base.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (base, None),
    };
    let separator = match head.find('?') {
        None => "?",
        Some(_) if head.ends_with('?') || head.ends_with('&') => "",
        Some(_) => "&",
    };
    let mut url = format!(
        "{head}{separator}source={}&apiKey={}",
        urlencoding::encode(source),
        urlencoding::encode(api_key)
    );
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}

/// Whether an [`ArticleFetcher`] emits log events.
///
/// This governs every event the fetcher emits, success summaries included.
/// The `#[instrument]` spans around `fetch` and `try_fetch` are still
/// created; they carry only the redacted URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorLogging {
    /// No events: failures become an empty result without a trace.
    #[default]
    Silent,
    /// Each failure is reported with `warn!` before collapsing, and
    /// successful fetches get a `debug!` summary.
    Warn,
}

/// Timeouts and logging for an [`ArticleFetcher`].
///
/// The default is 15 s to connect, 10 s per read, and [`ErrorLogging::Silent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetcherOptions {
    /// Maximum wait for the TCP (and TLS) connection to be established.
    pub connect_timeout: Duration,
    /// Maximum wait for each read from the socket, including the headers.
    pub read_timeout: Duration,
    pub error_logging: ErrorLogging,
}

impl Default for FetcherOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            read_timeout: Duration::from_secs(10),
            error_logging: ErrorLogging::Silent,
        }
    }
}

/// Anything that can turn a request URL into articles without failing.
///
/// An empty list means "no data", whatever the reason.
pub trait ArticleSource {
    fn fetch_articles(&self, url: &str) -> impl Future<Output = Vec<ArticleRecord>> + Send;
}

/// Fetches and parses News API article lists.
///
/// Each call performs exactly one GET; calls share nothing but the
/// connection pool of the underlying client and may run concurrently.
#[derive(Debug, Clone)]
pub struct ArticleFetcher {
    client: reqwest::Client,
    options: FetcherOptions,
}

impl ArticleFetcher {
    /// Create a fetcher with the default 15 s connect / 10 s read timeouts.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_options(FetcherOptions::default())
    }

    /// Create a fetcher with explicit timeouts and logging.
    ///
    /// # Arguments
    ///
    /// * `options` - Timeouts and the [`ErrorLogging`] mode
    ///
    /// # Returns
    ///
    /// The fetcher, or the `reqwest` error if the client cannot be built
    /// (e.g. the TLS backend fails to initialize).
    pub fn with_options(options: FetcherOptions) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(options.connect_timeout)
            .read_timeout(options.read_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, options })
    }

    pub fn options(&self) -> &FetcherOptions {
        &self.options
    }

    /// Fetch articles, collapsing every failure into an empty list.
    ///
    /// # Arguments
    ///
    /// * `url` - Request URL, usually from [`build_request_url`]
    ///
    /// # Returns
    ///
    /// The articles in response order. Empty for a legitimately empty
    /// `"articles"` array and for every failure alike.
    #[instrument(level = "debug", skip_all, fields(url = %redact_api_key(url)))]
    pub async fn fetch(&self, url: &str) -> Vec<ArticleRecord> {
        match self.try_fetch(url).await {
            Ok(articles) => articles,
            Err(e) => {
                if self.options.error_logging == ErrorLogging::Warn {
                    let truncated =
                        matches!(&e, FetchError::Parse(ParseError::Json(j)) if looks_truncated(j));
                    warn!(
                        kind = %e.kind(),
                        timeout = e.is_timeout(),
                        truncated,
                        error = %e,
                        "Fetch produced no articles"
                    );
                }
                Vec::new()
            }
        }
    }

    /// Fetch articles, reporting why none could be produced.
    ///
    /// # Errors
    ///
    /// - [`FetchError::MalformedUrl`] if `url` is not an absolute http(s) URL
    /// - [`FetchError::Network`] if the connection fails or times out
    /// - [`FetchError::HttpStatus`] for any status other than `200 OK`
    /// - [`FetchError::Parse`] if the body is empty or not the expected shape
    #[instrument(level = "debug", skip_all, fields(url = %redact_api_key(url)))]
    pub async fn try_fetch(&self, url: &str) -> Result<Vec<ArticleRecord>, FetchError> {
        let request_url = parse_request_url(url)?;

        let t0 = Instant::now();
        let response = self.client.get(request_url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            // Dropping the response releases the connection without reading the body
            return Err(FetchError::HttpStatus(status));
        }

        let bytes = response.bytes().await?;
        let body = String::from_utf8_lossy(&bytes);
        let articles = parse_articles(&body).inspect_err(|e| {
            if self.options.error_logging == ErrorLogging::Warn {
                debug!(
                    error = %e,
                    body_preview = %truncate_for_log(&body, 200),
                    "Response body did not parse"
                );
            }
        })?;

        if self.options.error_logging == ErrorLogging::Warn {
            debug!(
                count = articles.len(),
                bytes = bytes.len(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Fetched articles"
            );
        }
        Ok(articles)
    }
}

impl ArticleSource for ArticleFetcher {
    fn fetch_articles(&self, url: &str) -> impl Future<Output = Vec<ArticleRecord>> + Send {
        self.fetch(url)
    }
}

fn parse_request_url(url: &str) -> Result<Url, FetchError> {
    let malformed = |reason: String| FetchError::MalformedUrl {
        url: redact_api_key(url),
        reason,
    };
    let parsed = Url::parse(url.trim()).map_err(|e| malformed(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(parsed),
        "http" | "https" => Err(malformed("missing host".to_string())),
        other => Err(malformed(format!("unsupported scheme '{other}'"))),
    }
}

/// Parse a News API response body into records, in array order.
///
/// A missing key or a JSON `null` becomes the `"null"` sentinel; numbers and
/// booleans keep their JSON text. Any element that is not an object, or a
/// field holding an array or object, fails the whole body.
///
/// # Examples
///
/// ```
/// use dnd_headlines::fetcher::parse_articles;
///
/// let articles = parse_articles(r#"{"articles": [{"title": "Hello"}]}"#).unwrap();
/// assert_eq!(articles[0].title, "Hello");
/// assert_eq!(articles[0].image_url, "null");
/// ```
pub fn parse_articles(body: &str) -> Result<Vec<ArticleRecord>, ParseError> {
    if body.trim().is_empty() {
        return Err(ParseError::EmptyBody);
    }
    let root: Value = serde_json::from_str(body)?;
    let items = root
        .get("articles")
        .and_then(Value::as_array)
        .ok_or(ParseError::MissingArticles)?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let obj = item.as_object().ok_or(ParseError::NotAnObject { index })?;
            Ok(ArticleRecord {
                author: text_field(obj, index, "author")?,
                title: text_field(obj, index, "title")?,
                description: text_field(obj, index, "description")?,
                url: text_field(obj, index, "url")?,
                image_url: text_field(obj, index, "urlToImage")?,
                published_at: text_field(obj, index, "publishedAt")?,
            })
        })
        .collect()
}

fn text_field(
    obj: &Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<String, ParseError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(NULL_SENTINEL.to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(v.to_string()),
        Some(Value::Array(_) | Value::Object(_)) => {
            Err(ParseError::InvalidField { index, field })
        }
    }
}
