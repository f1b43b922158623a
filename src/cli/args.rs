//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Modcache - persistent HTTP cache for module resolution toolchains
///
/// Inspect and seed the on-disk cache that module resolvers use to avoid
/// refetching remote resources.
#[derive(Parser, Debug)]
#[command(name = "modcache")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MODCACHE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Global cache root directory
    #[arg(long, global = true, env = "MODCACHE_DIR")]
    pub root: Option<PathBuf>,

    /// Project-local vendor cache root
    #[arg(long, global = true)]
    pub vendor_root: Option<PathBuf>,

    /// Never write to the cache
    #[arg(long, global = true)]
    pub read_only: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a cached response body to stdout
    Get(GetArgs),

    /// Print cached response headers as JSON
    Headers(HeadersArgs),

    /// Store a response body and headers for a URL
    Set(SetArgs),

    /// Print the on-disk path of a URL's cache entry
    Path(PathArgs),
}

/// Arguments for the get command
#[derive(Parser, Debug)]
pub struct GetArgs {
    /// URL to look up
    pub url: String,

    /// Expected sha256 of the body, hex-encoded
    #[arg(long)]
    pub checksum: Option<String>,

    /// Do not promote global entries into the vendor cache
    #[arg(long)]
    pub no_copy: bool,
}

/// Arguments for the headers command
#[derive(Parser, Debug)]
pub struct HeadersArgs {
    /// URL to look up
    pub url: String,
}

/// Arguments for the set command
#[derive(Parser, Debug)]
pub struct SetArgs {
    /// URL to store under
    pub url: String,

    /// Read the body from this file instead of stdin
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Response header to store (repeatable)
    #[arg(short = 'H', long = "header", value_name = "KEY=VALUE")]
    pub headers: Vec<String>,
}

/// Arguments for the path command
#[derive(Parser, Debug)]
pub struct PathArgs {
    /// URL to map
    pub url: String,
}
