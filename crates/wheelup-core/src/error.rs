//! Error types for a wheelup run.
//!
//! `WheelupError` separates pre-flight configuration problems from per-candidate
//! failures and from the terminal "nothing matched" condition, so the CLI can
//! pick the right message and exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single blocking HTTP GET (listing document or wheel download).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (connection refused, DNS, timeout, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Writing the response body to disk failed.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum WheelupError {
    /// The environment is not usable (uploader missing, bad listing URL).
    #[error("configuration: {0}")]
    Configuration(String),

    #[error("GET {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: FetchError,
    },

    /// A candidate matched the package prefix but its stem is not
    /// `project-version-pytag-abitag-platform`.
    #[error("malformed wheel name {name:?}: expected 5 dash-separated fields, got {fields}")]
    MalformedArtifactName { name: String, fields: usize },

    /// A listing entry cannot be used as a plain file name in the wheel directory.
    #[error("refusing to use {name:?} as a local file name")]
    UnsafeArtifactName { name: String },

    #[error("found no wheels at {url} for {prefix} and type {wheel_type}")]
    NoMatchingArtifacts {
        url: String,
        prefix: String,
        wheel_type: String,
    },

    /// The uploader ran but exited unsuccessfully. `code` is `None` when it was
    /// killed by a signal.
    #[error("upload failed ({})", describe_exit(.code))]
    UploadFailed { code: Option<i32> },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "terminated by signal".to_string(),
    }
}

pub type Result<T, E = WheelupError> = std::result::Result<T, E>;
