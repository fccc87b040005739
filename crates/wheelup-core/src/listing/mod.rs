//! Directory listing scraper.
//!
//! Fetches an HTML directory index and pulls out wheel file names. File servers
//! render listings differently, so a cascade of strategies is tried from most
//! to least specific and the first non-empty result wins. Names are returned
//! as they appear in the document: no dedup, no sorting.

mod strategy;

pub use strategy::{anchor_texts, colname_cells, is_wheel_text, text_nodes};

use scraper::Html;

use crate::error::{Result, WheelupError};
use crate::http::{self, CurlOptions};

/// Fetches `url` and returns the wheel names found in it.
///
/// An empty vector means the listing held no wheels; deciding whether that is
/// an error is up to the caller.
pub fn scrape(url: &str, curl: CurlOptions) -> Result<Vec<String>> {
    let html = http::get_text(url, curl).map_err(|source| WheelupError::Network {
        url: url.to_string(),
        source,
    })?;
    Ok(extract_wheel_names(&html))
}

/// Runs the strategy cascade over an already fetched document.
pub fn extract_wheel_names(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    for (name, extract) in strategy::CASCADE {
        let found = extract(&doc);
        if !found.is_empty() {
            tracing::debug!(strategy = name, count = found.len(), "wheel names found");
            return found;
        }
    }
    tracing::debug!("no wheel names in listing");
    Vec::new()
}

/// Validates the listing URL and makes sure it ends with `/`, so that
/// `{dir}{filename}` addresses a file inside it.
pub fn normalize_dir_url(raw: &str) -> Result<String> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| WheelupError::Configuration(format!("invalid wheel URL {raw:?}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(WheelupError::Configuration(format!(
            "unsupported scheme in wheel URL {raw:?}"
        )));
    }
    let mut dir = raw.to_string();
    if !dir.ends_with('/') {
        dir.push('/');
    }
    Ok(dir)
}
