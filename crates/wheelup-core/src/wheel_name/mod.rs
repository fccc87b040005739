//! Wheel filename model.
//!
//! A wheel filename is `{project}-{version}-{python tag}-{abi tag}-{platform tag}.whl`.
//! Names come verbatim from a remote listing, so [`check_local_name`] guards
//! their use as local file names.

mod safety;

pub use safety::check_local_name;

use crate::error::{Result, WheelupError};

/// Decomposed wheel filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelName {
    pub project: String,
    pub version: String,
    pub python_tag: String,
    pub abi_tag: String,
    pub platform_tag: String,
}

impl WheelName {
    /// Splits `filename` into its five fields. The extension (from the last
    /// `.`) is dropped first; any other field count is an error.
    pub fn parse(filename: &str) -> Result<Self> {
        let stem = strip_extension(filename);
        let parts: Vec<&str> = stem.split('-').collect();
        match parts.as_slice() {
            [project, version, python_tag, abi_tag, platform_tag] => Ok(WheelName {
                project: project.to_string(),
                version: version.to_string(),
                python_tag: python_tag.to_string(),
                abi_tag: abi_tag.to_string(),
                platform_tag: platform_tag.to_string(),
            }),
            _ => Err(WheelupError::MalformedArtifactName {
                name: filename.to_string(),
                fields: parts.len(),
            }),
        }
    }

    /// True if this wheel is for `wheel_type`: `"all"` matches everything,
    /// anything else must be a substring of the platform tag.
    pub fn matches_platform(&self, wheel_type: &str) -> bool {
        wheel_type == "all" || self.platform_tag.contains(wheel_type)
    }
}

/// Drops the final extension, ignoring leading dots (`.bashrc` has none).
fn strip_extension(filename: &str) -> &str {
    let body_start = filename.len() - filename.trim_start_matches('.').len();
    match filename[body_start..].rfind('.') {
        Some(i) => &filename[..body_start + i],
        None => filename,
    }
}
