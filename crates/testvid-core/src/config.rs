use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::fetch::{FetchOptions, DEFAULT_CHUNK_SIZE, DEFAULT_USER_AGENT};

/// Smallest receive buffer libcurl accepts.
pub const MIN_CHUNK_SIZE: usize = 1024;
/// Largest receive buffer libcurl accepts on every supported version.
pub const MAX_CHUNK_SIZE: usize = 512 * 1024;

/// Optional overrides loaded from `~/.config/testvid/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Directory the videos are written to (relative to the working directory).
    pub data_dir: PathBuf,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Bytes read per chunk when the size is known. Clamped to libcurl's range.
    pub chunk_size: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl FetchConfig {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            user_agent: self.user_agent.clone(),
            chunk_size: self.chunk_size.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("testvid")?;
    Ok(xdg_dirs.get_config_file("config.toml"))
}

/// Load configuration from the XDG config dir. Never fails: a missing,
/// unreadable or malformed file yields defaults. The file is never created.
pub fn load() -> FetchConfig {
    match config_path() {
        Ok(path) => load_or_default(&path),
        Err(e) => {
            tracing::warn!("no config directory ({}); using defaults", e);
            FetchConfig::default()
        }
    }
}

/// Like [`load_from`], but logs a bad file and falls back to defaults.
pub fn load_or_default(path: &Path) -> FetchConfig {
    load_from(path).unwrap_or_else(|e| {
        tracing::warn!("ignoring config: {:#}", e);
        FetchConfig::default()
    })
}

/// Load configuration from `path`; a missing file yields defaults, a malformed one is an error.
pub fn load_from(path: &Path) -> Result<FetchConfig> {
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(FetchConfig::default());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: FetchConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
