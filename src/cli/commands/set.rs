//! Set command - store a response body and headers for a URL

use crate::cache::{CreateOptions, HttpCache};
use crate::cli::args::SetArgs;
use crate::cli::parse_url;
use crate::error::{CacheError, CacheResult};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use tracing::debug;

/// Execute the set command
pub fn execute(args: SetArgs, options: CreateOptions) -> CacheResult<()> {
    let url = parse_url(&args.url)?;
    let headers = parse_headers(&args.headers)?;
    let body = read_body(&args)?;

    let cache = HttpCache::new(options)?;
    cache.set(&url, headers, &body)?;
    debug!("Stored {} bytes for {}", body.len(), url);
    Ok(())
}

fn read_body(args: &SetArgs) -> CacheResult<Vec<u8>> {
    match &args.file {
        Some(path) => fs::read(path)
            .map_err(|e| CacheError::io(format!("reading body from {}", path.display()), e)),
        None => {
            let mut body = Vec::new();
            io::stdin()
                .read_to_end(&mut body)
                .map_err(|e| CacheError::io("reading body from stdin", e))?;
            Ok(body)
        }
    }
}

fn parse_headers(raw: &[String]) -> CacheResult<HashMap<String, String>> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
                .ok_or_else(|| CacheError::InvalidHeader(pair.clone()))
        })
        .collect()
}
