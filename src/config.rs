//! CLI configuration
//!
//! Resolution order for cache locations: explicit flags, then environment,
//! then an optional TOML config file, then built-in defaults. The library
//! itself takes fully resolved [`CreateOptions`](crate::cache::CreateOptions)
//! and never reads configuration on its own.

use crate::error::{CacheError, CacheResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// On-disk configuration file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Global cache root directory
    pub root: Option<PathBuf>,

    /// Project-local vendor cache root
    pub vendor_root: Option<PathBuf>,

    /// Never write to the cache
    pub read_only: Option<bool>,
}

impl CacheConfig {
    /// Load configuration from `path`, or from the default location
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load(path: Option<&Path>) -> CacheResult<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_config_path(),
        };

        if !path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| CacheError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| CacheError::ConfigInvalid {
            path,
            reason: e.to_string(),
        })
    }
}

/// Default config file path (`~/.config/modcache/config.toml` on Linux)
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("modcache")
        .join("config.toml")
}

/// Default global cache root (`~/.cache/modcache/http` on Linux)
pub fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("modcache")
        .join("http")
}
