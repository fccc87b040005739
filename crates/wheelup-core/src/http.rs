//! Blocking HTTP GET helpers built on the curl crate (libcurl).
//!
//! Both helpers follow redirects and run in the current thread. Apart from an
//! optional connect timeout, libcurl defaults apply.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::FetchError;

/// Options applied to every curl handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlOptions {
    pub connect_timeout: Option<Duration>,
}

fn easy_for(url: &str, opts: CurlOptions) -> Result<curl::easy::Easy, FetchError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    if let Some(t) = opts.connect_timeout {
        easy.connect_timeout(t)?;
    }
    Ok(easy)
}

fn check_status(easy: &mut curl::easy::Easy) -> Result<(), FetchError> {
    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    Ok(())
}

/// GETs `url` and returns the body as text (invalid UTF-8 replaced).
pub fn get_text(url: &str, opts: CurlOptions) -> Result<String, FetchError> {
    let mut body = Vec::new();
    let mut easy = easy_for(url, opts)?;
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }
    check_status(&mut easy)?;
    tracing::debug!(url, bytes = body.len(), "fetched document");
    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Temp path used while downloading to `dest` (`<dest>.part`).
pub fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// GETs `url` into `dest`. The body is written to `<dest>.part` and renamed
/// over `dest` only after a 2xx response; on failure the part file is removed.
/// Returns the number of bytes written.
pub fn download_to_file(url: &str, dest: &Path, opts: CurlOptions) -> Result<u64, FetchError> {
    let temp = part_path(dest);
    let result = download_part(url, &temp, opts);
    match result {
        Ok(written) => {
            fs::rename(&temp, dest)?;
            Ok(written)
        }
        Err(e) => {
            if let Err(rm) = fs::remove_file(&temp) {
                tracing::debug!("could not remove {}: {}", temp.display(), rm);
            }
            Err(e)
        }
    }
}

fn download_part(url: &str, temp: &Path, opts: CurlOptions) -> Result<u64, FetchError> {
    let mut file = File::create(temp)?;
    let mut written: u64 = 0;
    let mut write_err: Option<std::io::Error> = None;
    let mut easy = easy_for(url, opts)?;
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match file.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                tracing::warn!("download write failed: {}", e);
                write_err = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        let performed = transfer.perform();
        drop(transfer);
        if let Some(e) = write_err.take() {
            return Err(FetchError::Storage(e));
        }
        performed?;
    }
    check_status(&mut easy)?;
    file.sync_all()?;
    Ok(written)
}
