//! Rendering of fetched headlines.
//!
//! # Submodules
//!
//! - [`text`]: Ranked plain-text list for the terminal
//! - [`markdown`]: One section per source with linked headlines
//! - [`json`]: The [`HeadlinesPage`] values serialized as a JSON array
//!
//! Rendered output goes to stdout or to a file via [`write_output`].

pub mod json;
pub mod markdown;
pub mod text;

use crate::models::HeadlinesPage;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Output format selectable on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

/// Render `pages` in the requested format.
///
/// # Arguments
///
/// * `format` - Output format
/// * `pages` - One page per requested source, in request order
/// * `now` - Reference time for relative ages ("3 hours ago")
///
/// # Returns
///
/// The rendered document. Only JSON serialization can fail.
pub fn render(
    format: OutputFormat,
    pages: &[HeadlinesPage],
    now: DateTime<Utc>,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(text::render_pages(pages, now)),
        OutputFormat::Markdown => Ok(markdown::render_pages(pages, now)),
        OutputFormat::Json => json::render_pages(pages),
    }
}

/// Write rendered output to `path`, creating its parent directory.
///
/// An existing file is overwritten.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_output(path: &Path, rendered: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(dir = %parent.display(), error = %e, "Failed to create output dir");
            return Err(e.into());
        }
    }
    fs::write(path, rendered).await?;
    info!(bytes = rendered.len(), "Wrote headlines");
    Ok(())
}
