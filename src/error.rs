//! Error types for fetching, parsing, and configuration.
//!
//! [`FetchError`] covers everything that can go wrong between a request URL
//! and a list of articles. [`ArticleFetcher::fetch`](crate::fetcher::ArticleFetcher::fetch)
//! collapses all of them into an empty result; callers that need to tell
//! "no connectivity" apart from "zero articles" use `try_fetch` instead.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Malformed request URL '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {0}")]
    HttpStatus(StatusCode),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Coarse failure class of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    MalformedUrl,
    Network,
    HttpStatus,
    Parse,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::MalformedUrl { .. } => FetchErrorKind::MalformedUrl,
            FetchError::Network(_) => FetchErrorKind::Network,
            FetchError::HttpStatus(_) => FetchErrorKind::HttpStatus,
            FetchError::Parse(_) => FetchErrorKind::Parse,
        }
    }

    /// True when the request timed out (connect or read).
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Network(e) if e.is_timeout())
    }
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FetchErrorKind::MalformedUrl => "malformed_url",
            FetchErrorKind::Network => "network",
            FetchErrorKind::HttpStatus => "http_status",
            FetchErrorKind::Parse => "parse",
        };
        f.write_str(name)
    }
}

/// Reasons a response body could not be turned into articles.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Response body is empty")]
    EmptyBody,

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Top-level value has no \"articles\" array")]
    MissingArticles,

    #[error("Article at index {index} is not an object")]
    NotAnObject { index: usize },

    #[error("Field '{field}' of article {index} is not a scalar value")]
    InvalidField { index: usize, field: &'static str },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
