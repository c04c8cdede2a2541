//! Markdown rendering.
//!
//! Produces one document with a section per source. Headlines with a real
//! link become Markdown links; the description, when present, follows as a
//! quoted line under its headline.

use crate::models::{HeadlinesPage, present};
use crate::outputs::text::NO_HEADLINES;
use chrono::{DateTime, Utc};
use std::fmt::Write;

pub fn render_pages(pages: &[HeadlinesPage], now: DateTime<Utc>) -> String {
    let mut md = String::new();
    writeln!(md, "# Top headlines\n").unwrap();
    writeln!(md, "_Fetched {}_", now.format("%Y-%m-%d %H:%M UTC")).unwrap();

    for page in pages {
        writeln!(md, "\n## {}\n", escape(&page.label)).unwrap();
        if page.articles.is_empty() {
            writeln!(md, "{NO_HEADLINES}").unwrap();
            continue;
        }

        for (rank, article) in page.articles.iter().enumerate() {
            let title = escape(present(&article.title).unwrap_or("Untitled").trim());
            let headline = match article.link() {
                Some(link) => format!("[{title}]({link})"),
                None => title,
            };
            match article.relative_age(now) {
                Some(age) => writeln!(md, "{}. {headline} ({age})", rank + 1).unwrap(),
                None => writeln!(md, "{}. {headline}", rank + 1).unwrap(),
            }
            if let Some(description) = present(&article.description) {
                writeln!(md, "   > {}", escape(description.trim())).unwrap();
            }
        }
    }
    md
}

fn escape(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}
