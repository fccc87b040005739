use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::http::CurlOptions;

/// Listing used when neither the config file nor `--wheel-url-dir` names one.
pub const DEFAULT_WHEEL_URL_DIR: &str = "http://wheels.scikit-image.org";

/// Global configuration loaded from `~/.config/wheelup/config.toml`.
/// Command-line flags override these values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelupConfig {
    /// Web directory holding the wheels.
    pub wheel_url_dir: String,
    /// Default platform filter (`all`, `macosx`, `win`, `manylinux1`, `linux`, ...).
    pub wheel_type: String,
    /// Uploader program, invoked as `<uploader> upload ...`.
    pub uploader: String,
    /// Optional connect timeout in seconds (None = libcurl default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

impl Default for WheelupConfig {
    fn default() -> Self {
        Self {
            wheel_url_dir: DEFAULT_WHEEL_URL_DIR.to_string(),
            wheel_type: "macosx".to_string(),
            uploader: "twine".to_string(),
            connect_timeout_secs: None,
        }
    }
}

impl WheelupConfig {
    pub fn curl_options(&self) -> CurlOptions {
        CurlOptions {
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("wheelup")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<WheelupConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = WheelupConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: WheelupConfig = toml::from_str(&data)?;
    Ok(cfg)
}
