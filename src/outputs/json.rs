//! JSON rendering for downstream tools.
//!
//! The output is a pretty-printed array of [`HeadlinesPage`] objects, one per
//! requested source, with article fields exactly as received (including the
//! `"null"` sentinel).

use crate::models::HeadlinesPage;

pub fn render_pages(pages: &[HeadlinesPage]) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(pages)?;
    json.push('\n');
    Ok(json)
}
