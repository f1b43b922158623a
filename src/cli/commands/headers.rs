//! Headers command - print cached response headers

use crate::cache::{CreateOptions, HttpCache};
use crate::cli::args::HeadersArgs;
use crate::cli::parse_url;
use crate::error::{CacheError, CacheResult};

/// Execute the headers command
pub fn execute(args: HeadersArgs, options: CreateOptions) -> CacheResult<()> {
    let url = parse_url(&args.url)?;
    let cache = HttpCache::new(options)?;

    match cache.headers(&url)? {
        Some(headers) => {
            println!("{}", serde_json::to_string_pretty(&headers)?);
            Ok(())
        }
        None => Err(CacheError::NotCached(url.to_string())),
    }
}
