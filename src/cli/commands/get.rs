//! Get command - print a cached response body

use crate::cache::{CreateOptions, GetOptions, HttpCache};
use crate::cli::args::GetArgs;
use crate::cli::parse_url;
use crate::error::{CacheError, CacheResult};
use std::io::{self, Write};

/// Execute the get command
pub fn execute(args: GetArgs, options: CreateOptions) -> CacheResult<()> {
    let url = parse_url(&args.url)?;
    let cache = HttpCache::new(options)?;

    let bytes = cache.get(
        &url,
        GetOptions {
            checksum: args.checksum.as_deref(),
            allow_copy_global_to_local: !args.no_copy,
        },
    )?;

    match bytes {
        Some(bytes) => {
            io::stdout()
                .write_all(&bytes)
                .map_err(|e| CacheError::io("writing body to stdout", e))?;
            Ok(())
        }
        None => Err(CacheError::NotCached(url.to_string())),
    }
}
