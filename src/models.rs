//! Data models for fetched headlines.
//!
//! This module defines the data structures shared by the fetcher, the
//! controller, and the renderers:
//! - [`ArticleRecord`]: One news item as returned by the News API
//! - [`HeadlinesPage`]: The articles fetched for a single source
//!
//! # The `"null"` sentinel
//!
//! The News API emits the literal text `"null"` for string fields it has no
//! value for. Records keep that text verbatim in their fields (and the parser
//! fills in the same text for absent keys), so downstream code must go
//! through [`present`] or the typed accessors before treating a field as a
//! real value.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Text the News API uses in place of a missing string value.
pub const NULL_SENTINEL: &str = "null";

/// Returns `Some(value)` unless it is empty or the `"null"` sentinel.
///
/// # Examples
///
/// ```
/// use dnd_headlines::models::present;
///
/// assert_eq!(present("BBC News"), Some("BBC News"));
/// assert_eq!(present("null"), None);
/// assert_eq!(present("   "), None);
/// ```
pub fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == NULL_SENTINEL {
        None
    } else {
        Some(value)
    }
}

/// One news item, in the API's ranking order.
///
/// Every field is textual and may hold [`NULL_SENTINEL`]. A record with every
/// field set to the sentinel is still valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    pub author: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
    /// ISO-8601-like timestamp, not guaranteed parseable.
    pub published_at: String,
}

impl Default for ArticleRecord {
    fn default() -> Self {
        Self {
            author: NULL_SENTINEL.to_string(),
            title: NULL_SENTINEL.to_string(),
            description: NULL_SENTINEL.to_string(),
            url: NULL_SENTINEL.to_string(),
            image_url: NULL_SENTINEL.to_string(),
            published_at: NULL_SENTINEL.to_string(),
        }
    }
}

impl ArticleRecord {
    /// The article link, if it is a real absolute http(s) URL.
    pub fn link(&self) -> Option<Url> {
        web_url(&self.url)
    }

    /// The thumbnail link, if it is a real absolute http(s) URL.
    pub fn thumbnail(&self) -> Option<Url> {
        web_url(&self.image_url)
    }

    /// Publication instant parsed from `published_at`.
    ///
    /// Accepts RFC 3339 (`2017-05-01T12:30:05Z`, with or without fractional
    /// seconds or an offset). A bare `YYYY-MM-DDTHH:MM:SS` is read as UTC.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        let raw = present(&self.published_at)?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Minute-resolution "time ago" text relative to `now`.
    ///
    /// Returns `None` when the timestamp is missing or unparseable.
    pub fn relative_age(&self, now: DateTime<Utc>) -> Option<String> {
        let published = self.published()?;
        let elapsed = now.signed_duration_since(published);

        let minutes = elapsed.num_minutes();
        if minutes < 1 {
            return Some("just now".to_string());
        }
        let (count, unit) = if minutes < 60 {
            (minutes, "minute")
        } else if elapsed.num_hours() < 24 {
            (elapsed.num_hours(), "hour")
        } else {
            (elapsed.num_days(), "day")
        };
        let plural = if count == 1 { "" } else { "s" };
        Some(format!("{count} {unit}{plural} ago"))
    }
}

fn web_url(raw: &str) -> Option<Url> {
    let parsed = Url::parse(present(raw)?.trim()).ok()?;
    matches!(parsed.scheme(), "http" | "https").then_some(parsed)
}

/// The headlines fetched for one news source.
///
/// Each run of the front end produces one page per requested source, which
/// the renderers in [`crate::outputs`] turn into text, Markdown, or JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlinesPage {
    /// The source slug used in the request (e.g. `bbc-news`).
    pub source: String,
    /// Display title for the source.
    pub label: String,
    /// When the fetch completed; serialized as RFC 3339.
    pub fetched_at: DateTime<Utc>,
    /// Articles in ranking order; empty when the fetch produced no data.
    pub articles: Vec<ArticleRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record_published_at(published_at: &str) -> ArticleRecord {
        ArticleRecord {
            published_at: published_at.to_string(),
            ..ArticleRecord::default()
        }
    }

    #[test]
    fn test_default_record_is_all_sentinel() {
        let record = ArticleRecord::default();
        assert_eq!(record.title, "null");
        assert_eq!(record.image_url, "null");
        assert!(record.link().is_none());
        assert!(record.published().is_none());
    }

    #[test]
    fn test_present() {
        assert_eq!(present("hello"), Some("hello"));
        assert_eq!(present("null"), None);
        assert_eq!(present(""), None);
        assert_eq!(present("nullable"), Some("nullable"));
    }

    #[test]
    fn test_link_rejects_sentinel_and_relative() {
        let mut record = ArticleRecord::default();
        assert!(record.link().is_none());

        record.url = "/2017/05/01/story".to_string();
        assert!(record.link().is_none());

        record.url = "ftp://example.com/file".to_string();
        assert!(record.link().is_none());

        record.url = "https://www.bbc.co.uk/news/world-39775523".to_string();
        assert_eq!(
            record.link().map(|u| u.host_str().map(str::to_string)),
            Some(Some("www.bbc.co.uk".to_string()))
        );
    }

    #[test]
    fn test_thumbnail() {
        let record = ArticleRecord {
            image_url: "https://ichef.bbci.co.uk/news/1024/x.jpg".to_string(),
            ..ArticleRecord::default()
        };
        assert!(record.thumbnail().is_some());
    }

    #[test]
    fn test_published_parses_rfc3339_variants() {
        let expected = Utc.with_ymd_and_hms(2017, 5, 1, 12, 30, 5).unwrap();
        assert_eq!(
            record_published_at("2017-05-01T12:30:05Z").published(),
            Some(expected)
        );
        assert_eq!(
            record_published_at("2017-05-01T12:30:05.123Z")
                .published()
                .map(|d| d.timestamp()),
            Some(expected.timestamp())
        );
        assert_eq!(
            record_published_at("2017-05-01T14:30:05+02:00").published(),
            Some(expected)
        );
        assert_eq!(
            record_published_at("2017-05-01T12:30:05").published(),
            Some(expected)
        );
    }

    #[test]
    fn test_published_rejects_garbage() {
        assert!(record_published_at("yesterday").published().is_none());
        assert!(record_published_at("null").published().is_none());
    }

    #[test]
    fn test_relative_age() {
        let now = Utc.with_ymd_and_hms(2017, 5, 2, 12, 0, 0).unwrap();

        let age = |s: &str| record_published_at(s).relative_age(now);
        assert_eq!(age("2017-05-02T11:59:30Z").as_deref(), Some("just now"));
        assert_eq!(age("2017-05-02T12:05:00Z").as_deref(), Some("just now"));
        assert_eq!(age("2017-05-02T11:59:00Z").as_deref(), Some("1 minute ago"));
        assert_eq!(age("2017-05-02T11:15:00Z").as_deref(), Some("45 minutes ago"));
        assert_eq!(age("2017-05-02T09:00:00Z").as_deref(), Some("3 hours ago"));
        assert_eq!(age("2017-05-01T11:00:00Z").as_deref(), Some("1 day ago"));
        assert_eq!(age("2017-04-28T12:00:00Z").as_deref(), Some("4 days ago"));
        assert_eq!(age("null"), None);
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = ArticleRecord {
            image_url: "https://example.com/a.jpg".to_string(),
            ..ArticleRecord::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"imageUrl\":\"https://example.com/a.jpg\""));
        assert!(json.contains("\"publishedAt\":\"null\""));
    }

    #[test]
    fn test_headlines_page_deserialization() {
        let json = r#"{
            "source": "bbc-news",
            "label": "BBC News",
            "fetched_at": "2017-05-02T12:00:00Z",
            "articles": []
        }"#;
        let page: HeadlinesPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.source, "bbc-news");
        assert_eq!(
            page.fetched_at,
            Utc.with_ymd_and_hms(2017, 5, 2, 12, 0, 0).unwrap()
        );
        assert!(page.articles.is_empty());
    }

    #[test]
    fn test_headlines_page_fetched_at_is_timestamp() {
        let page = HeadlinesPage {
            source: "bbc-news".to_string(),
            label: "BBC News".to_string(),
            fetched_at: Utc.with_ymd_and_hms(2017, 5, 2, 12, 0, 0).unwrap(),
            articles: vec![],
        };
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["fetched_at"], "2017-05-02T12:00:00Z");

        let bad = r#"{"source": "x", "label": "X", "fetched_at": "yesterday", "articles": []}"#;
        assert!(serde_json::from_str::<HeadlinesPage>(bad).is_err());
    }
}
