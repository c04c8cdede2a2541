//! Plain-text rendering for the terminal.

use crate::models::{HeadlinesPage, present};
use chrono::{DateTime, Utc};
use std::fmt::Write;

const UNTITLED: &str = "(untitled)";
pub(crate) const NO_HEADLINES: &str = "No headlines available.";

/// Render each page as an underlined heading followed by a ranked list.
///
/// ```text
/// BBC News
/// ========
///  1. First headline
///     3 hours ago | http://www.bbc.co.uk/news/uk-1
/// ```
pub fn render_pages(pages: &[HeadlinesPage], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        writeln!(out, "{}", page.label).unwrap();
        writeln!(out, "{}", "=".repeat(page.label.chars().count())).unwrap();

        if page.articles.is_empty() {
            writeln!(out, "{NO_HEADLINES}").unwrap();
            continue;
        }

        for (rank, article) in page.articles.iter().enumerate() {
            let title = present(&article.title).unwrap_or(UNTITLED);
            writeln!(out, "{:>2}. {}", rank + 1, title.trim()).unwrap();

            let details = [
                article.relative_age(now),
                Some(
                    article
                        .link()
                        .map(|u| u.to_string())
                        .unwrap_or_else(|| "no article preview".to_string()),
                ),
            ];
            let line = details.into_iter().flatten().collect::<Vec<_>>().join(" | ");
            writeln!(out, "    {line}").unwrap();
        }
    }
    out
}
