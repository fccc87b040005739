//! One complete run: check the uploader, scrape the listing, fetch the
//! matching wheels, then upload them (or just report them).

use std::path::PathBuf;

use crate::error::Result;
use crate::http::CurlOptions;
use crate::listing;
use crate::select::{self, FetchEvent, FetchResult, Fetcher, SelectionCriteria};
use crate::upload::{UploadOptions, Uploader};

/// Everything a run needs, resolved from flags and configuration.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub criteria: SelectionCriteria,
    /// Listing URL as given; a trailing `/` is added if missing.
    pub wheel_url_dir: String,
    pub wheel_dir: PathBuf,
    /// Skip the upload step and only report the wheels found.
    pub no_upload: bool,
    pub upload: UploadOptions,
    pub curl: CurlOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Uploaded(FetchResult),
    /// Upload disabled; the wheels were only collected.
    Skipped(FetchResult),
}

impl RunOutcome {
    pub fn fetch_result(&self) -> &FetchResult {
        match self {
            RunOutcome::Uploaded(r) | RunOutcome::Skipped(r) => r,
        }
    }
}

/// Runs the whole pipeline. The uploader is checked first, before any network
/// activity and whether or not the upload step is enabled.
pub fn run(
    opts: &RunOptions,
    uploader: &Uploader,
    fetcher: &dyn Fetcher,
    on_event: &mut dyn FnMut(FetchEvent<'_>),
) -> Result<RunOutcome> {
    uploader.check_available()?;
    let base_url = listing::normalize_dir_url(&opts.wheel_url_dir)?;

    let candidates = listing::scrape(&base_url, opts.curl)?;
    tracing::info!(
        count = candidates.len(),
        "scraped wheel names from {}",
        base_url
    );

    let result = select::select_and_fetch(
        &candidates,
        &opts.criteria,
        &opts.wheel_dir,
        &base_url,
        fetcher,
        on_event,
    )?;
    tracing::info!(
        found = result.found.len(),
        downloaded = result.downloaded.len(),
        "wheel selection complete"
    );

    if opts.no_upload {
        for path in &result.found {
            tracing::info!("not uploading {}", path.display());
        }
        return Ok(RunOutcome::Skipped(result));
    }
    uploader.upload(&result.found, &opts.upload)?;
    Ok(RunOutcome::Uploaded(result))
}
