//! # DND Headlines
//!
//! Fetches the top headlines of a news source from the News API and turns
//! them into plain article records.
//!
//! ## Features
//!
//! - Request URL composition for the `source` / `apiKey` query
//! - A single bounded-timeout GET per fetch (15 s connect, 10 s read)
//! - Tolerant parsing of the `"articles"` array, preserving the API's
//!   `"null"` sentinel for missing fields
//! - A [`FeedController`](controller::FeedController) for UI shells that
//!   need start, refresh, and cancel semantics
//! - Text, Markdown, and JSON renderers for the command-line front end
//!
//! ## Usage
//!
//! ```no_run
//! use dnd_headlines::fetcher::{ArticleFetcher, DEFAULT_ENDPOINT, build_request_url};
//!
//! # async fn run() -> Result<(), reqwest::Error> {
//! let fetcher = ArticleFetcher::new()?;
//! let url = build_request_url(DEFAULT_ENDPOINT, "bbc-news", "YOUR_KEY");
//! for article in fetcher.fetch(&url).await {
//!     println!("{}", article.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod outputs;
pub mod sources;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use controller::{FeedController, FetchDecision};
pub use error::{FetchError, FetchErrorKind, ParseError};
pub use fetcher::{ArticleFetcher, ArticleSource, build_request_url};
pub use models::ArticleRecord;
