//! Command-line interface

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, GetArgs, HeadersArgs, PathArgs, SetArgs};

use crate::cache::CreateOptions;
use crate::config::{self, CacheConfig};
use crate::error::{CacheError, CacheResult};
use std::path::PathBuf;
use url::Url;

/// Resolve cache options from flags, config file and defaults
pub fn create_options(cli: &Cli, config: &CacheConfig) -> CacheResult<CreateOptions> {
    let root = cli
        .root
        .clone()
        .or_else(|| config.root.clone())
        .unwrap_or_else(config::default_cache_root);
    let vendor_root = cli.vendor_root.clone().or_else(|| config.vendor_root.clone());

    let read_only = if cli.read_only {
        Some(true)
    } else {
        config.read_only
    };

    Ok(CreateOptions {
        root: absolutize(root)?,
        vendor_root: vendor_root.map(absolutize).transpose()?,
        read_only,
    })
}

/// Parse a URL argument, surfacing a clean error on garbage input
pub(crate) fn parse_url(input: &str) -> CacheResult<Url> {
    Url::parse(input).map_err(|_| CacheError::InvalidUrl(input.to_string()))
}

/// Flags may carry relative paths; the cache requires absolute roots
fn absolutize(path: PathBuf) -> CacheResult<PathBuf> {
    std::path::absolute(&path)
        .map_err(|e| CacheError::io(format!("resolving path {}", path.display()), e))
}
