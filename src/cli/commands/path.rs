//! Path command - print the on-disk path of a URL's cache entry

use crate::cache::{CreateOptions, HttpCache};
use crate::cli::args::PathArgs;
use crate::cli::parse_url;
use crate::error::CacheResult;

/// Execute the path command
pub fn execute(args: PathArgs, options: CreateOptions) -> CacheResult<()> {
    let url = parse_url(&args.url)?;
    let cache = HttpCache::new(options)?;
    println!("{}", cache.entry_path(&url).display());
    Ok(())
}
