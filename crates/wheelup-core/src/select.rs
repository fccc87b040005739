//! Wheel selection and download.
//!
//! Filters scraped names down to one package version and platform, then makes
//! sure each match is present in the local wheel directory.

use std::path::{Path, PathBuf};

use crate::error::{FetchError, Result, WheelupError};
use crate::http::{self, CurlOptions};
use crate::wheel_name::{check_local_name, WheelName};

/// What to look for. Fixed for the whole run.
#[derive(Debug, Clone)]
pub struct SelectionCriteria {
    pub package: String,
    pub version: String,
    /// Substring of the platform tag, or `"all"`.
    pub wheel_type: String,
    /// Re-download files that already exist locally.
    pub clobber: bool,
}

impl SelectionCriteria {
    /// Filename prefix shared by all wheels of this package version.
    pub fn prefix(&self) -> String {
        format!("{}-{}-", self.package, self.version)
    }
}

/// Outcome of [`select_and_fetch`]. Paths are in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchResult {
    /// Every local path that matched the criteria.
    pub found: Vec<PathBuf>,
    /// The subset of `found` downloaded during this run.
    pub downloaded: Vec<PathBuf>,
}

/// Progress notifications, one per matched wheel.
#[derive(Debug, Clone, Copy)]
pub enum FetchEvent<'a> {
    /// Present locally and clobbering is off.
    Kept { path: &'a Path },
    /// About to download `url` to `path`.
    Downloading { url: &'a str, path: &'a Path },
}

/// Downloads one file. Implemented over curl for real runs; tests substitute
/// their own to observe which downloads happen.
pub trait Fetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}

/// [`Fetcher`] doing a blocking libcurl GET per file.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlFetcher {
    pub curl: CurlOptions,
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let bytes = http::download_to_file(url, dest, self.curl).map_err(|e| match e {
            FetchError::Storage(source) => WheelupError::Io {
                path: dest.to_path_buf(),
                source,
            },
            source => WheelupError::Network {
                url: url.to_string(),
                source,
            },
        })?;
        tracing::debug!(url, bytes, "downloaded {}", dest.display());
        Ok(())
    }
}

/// Picks the candidates matching `criteria` and makes sure each is present in
/// `local_dir`, downloading from `{base_url}{name}` as needed.
///
/// Candidates are handled in order. A candidate that carries the package
/// prefix but does not decompose into five fields aborts the run at that
/// point. If nothing matches, the error carries the search parameters.
pub fn select_and_fetch(
    candidates: &[String],
    criteria: &SelectionCriteria,
    local_dir: &Path,
    base_url: &str,
    fetcher: &dyn Fetcher,
    on_event: &mut dyn FnMut(FetchEvent<'_>),
) -> Result<FetchResult> {
    let prefix = criteria.prefix();
    let mut result = FetchResult::default();

    for name in candidates {
        if !name.starts_with(&prefix) {
            continue;
        }
        let wheel = WheelName::parse(name)?;
        if !wheel.matches_platform(&criteria.wheel_type) {
            tracing::debug!(name = name.as_str(), "skipping: platform mismatch");
            continue;
        }
        check_local_name(name)?;

        let url = format!("{}{}", base_url, name);
        let path = local_dir.join(name);
        result.found.push(path.clone());

        if path.exists() && !criteria.clobber {
            tracing::info!("not overwriting {}", path.display());
            on_event(FetchEvent::Kept { path: &path });
            continue;
        }
        tracing::info!("downloading {} to {}", url, path.display());
        on_event(FetchEvent::Downloading {
            url: &url,
            path: &path,
        });
        fetcher.fetch(&url, &path)?;
        result.downloaded.push(path);
    }

    if result.found.is_empty() {
        return Err(WheelupError::NoMatchingArtifacts {
            url: base_url.to_string(),
            prefix,
            wheel_type: criteria.wheel_type.clone(),
        });
    }
    Ok(result)
}
