//! Logging helpers.
//!
//! - Redaction of the API key in request URLs before they reach a log line
//! - Truncation of response bodies for log previews
//! - Classification of JSON errors caused by cut-off bodies

use url::Url;

const API_KEY_PARAM: &str = "apiKey";

/// Replace the `apiKey` query value of a URL with `***` for logging.
///
/// Strings that do not parse as URLs are returned as-is after a plain text
/// scan, so malformed request URLs can still be logged safely.
///
/// # Examples
///
/// ```
/// use dnd_headlines::utils::redact_api_key;
///
/// assert_eq!(
///     redact_api_key("https://newsapi.org/v1/articles?source=bbc-news&apiKey=SECRET"),
///     "https://newsapi.org/v1/articles?source=bbc-news&apiKey=***"
/// );
/// ```
pub fn redact_api_key(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return redact_text(raw);
    };
    if !url.query_pairs().any(|(k, _)| k == API_KEY_PARAM) {
        return raw.to_string();
    }

    let query = url
        .query()
        .unwrap_or_default()
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((k, _)) if k == API_KEY_PARAM => format!("{k}=***"),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");
    url.set_query(Some(&query));
    url.to_string()
}

fn redact_text(raw: &str) -> String {
    let marker = format!("{API_KEY_PARAM}=");
    match raw.find(&marker) {
        Some(start) => {
            let value_start = start + marker.len();
            let value_end = raw[value_start..]
                .find('&')
                .map(|i| value_start + i)
                .unwrap_or(raw.len());
            format!("{}***{}", &raw[..value_start], &raw[value_end..])
        }
        None => raw.to_string(),
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (backing off to a character
/// boundary) with an ellipsis and the dropped byte count appended.
///
/// # Arguments
///
/// * `s` - Text to shorten
/// * `max` - Maximum number of bytes kept
///
/// # Examples
///
/// ```
/// use dnd_headlines::utils::truncate_for_log;
///
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Detect if a serde_json error indicates truncated/incomplete JSON.
///
/// A body cut off mid-transfer fails with an EOF error rather than a syntax
/// error, which is worth telling apart in logs.
pub fn looks_truncated(e: &serde_json::Error) -> bool {
    use serde_json::error::Category;
    matches!(e.classify(), Category::Eof)
}
