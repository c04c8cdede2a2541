//! Catalog of selectable News API sources.
//!
//! The catalog is only used for display titles and `--list-sources`; any slug
//! is accepted for a request and forwarded verbatim.

/// A News API source identifier together with its display title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsSource {
    pub slug: &'static str,
    pub label: &'static str,
}

/// Source used when none is configured.
pub const DEFAULT_SOURCE: &str = "google-news";

pub const NEWS_SOURCES: &[NewsSource] = &[
    NewsSource { slug: "abc-news-au", label: "ABC News (AU)" },
    NewsSource { slug: "al-jazeera-english", label: "Al Jazeera English" },
    NewsSource { slug: "ars-technica", label: "Ars Technica" },
    NewsSource { slug: "associated-press", label: "Associated Press" },
    NewsSource { slug: "bbc-news", label: "BBC News" },
    NewsSource { slug: "bloomberg", label: "Bloomberg" },
    NewsSource { slug: "breitbart-news", label: "Breitbart News" },
    NewsSource { slug: "business-insider", label: "Business Insider" },
    NewsSource { slug: "daily-mail", label: "Daily Mail" },
    NewsSource { slug: "engadget", label: "Engadget" },
    NewsSource { slug: "entertainment-weekly", label: "Entertainment Weekly" },
    NewsSource { slug: "financial-times", label: "Financial Times" },
    NewsSource { slug: "fortune", label: "Fortune" },
    NewsSource { slug: "four-four-two", label: "FourFourTwo" },
    NewsSource { slug: "fox-sports", label: "Fox Sports" },
    NewsSource { slug: "google-news", label: "Google News" },
    NewsSource { slug: "ign", label: "IGN" },
    NewsSource { slug: "mashable", label: "Mashable" },
    NewsSource { slug: "metro", label: "Metro" },
    NewsSource { slug: "mtv-news", label: "MTV News" },
    NewsSource { slug: "national-geographic", label: "National Geographic" },
    NewsSource { slug: "new-york-magazine", label: "New York Magazine" },
    NewsSource { slug: "nfl-news", label: "NFL News" },
    NewsSource { slug: "reuters", label: "Reuters" },
    NewsSource { slug: "talksport", label: "TalkSport" },
    NewsSource { slug: "techcrunch", label: "TechCrunch" },
    NewsSource { slug: "techradar", label: "TechRadar" },
    NewsSource { slug: "the-guardian-uk", label: "The Guardian (UK)" },
    NewsSource { slug: "the-hindu", label: "The Hindu" },
    NewsSource { slug: "the-lad-bible", label: "The Lad Bible" },
    NewsSource { slug: "the-new-york-times", label: "The New York Times" },
    NewsSource { slug: "the-wall-street-journal", label: "The Wall Street Journal" },
];

/// Look up a source in the catalog.
///
/// # Arguments
///
/// * `slug` - News API source identifier, matched exactly (`bbc-news`, not `BBC News`)
///
/// # Returns
///
/// The catalog entry, or `None` for slugs the catalog does not list. Such
/// slugs are still valid to request.
///
/// # Examples
///
/// ```
/// use dnd_headlines::sources::find;
///
/// assert_eq!(find("bbc-news").map(|s| s.label), Some("BBC News"));
/// assert!(find("BBC News").is_none());
/// ```
pub fn find(slug: &str) -> Option<&'static NewsSource> {
    NEWS_SOURCES.iter().find(|s| s.slug == slug)
}

/// Display title for a slug, or the slug itself when it is not in the catalog.
pub fn label_for(slug: &str) -> &str {
    find(slug).map(|s| s.label).unwrap_or(slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn test_default_source_is_listed() {
        assert_eq!(label_for(DEFAULT_SOURCE), "Google News");
    }

    #[test]
    fn test_label_for_known_and_unknown() {
        assert_eq!(label_for("bbc-news"), "BBC News");
        assert_eq!(label_for("my-local-paper"), "my-local-paper");
    }

    #[test]
    fn test_find_matches_slug_exactly() {
        assert_eq!(find("reuters").map(|s| s.label), Some("Reuters"));
        assert!(find("Reuters").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn test_catalog_slugs_are_unique_and_sorted() {
        assert_eq!(NEWS_SOURCES.len(), 32);
        assert!(NEWS_SOURCES.iter().map(|s| s.slug).all_unique());
        assert!(
            NEWS_SOURCES
                .iter()
                .tuple_windows()
                .all(|(a, b)| a.slug < b.slug)
        );
    }
}
