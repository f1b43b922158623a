//! Deterministic URL-to-path mapping for cache entries
//!
//! Every distinct URL maps to a stable relative path below a cache root:
//! `<scheme>/<host-dir>/<sha256 of path and query>`. Scheme, host, port,
//! path and query are all significant. The mapping is persisted state, not
//! an in-memory detail: entries written by one process must be found by the
//! next, so this layout is an on-disk format and must stay fixed.

use sha2::{Digest, Sha256};
use std::path::PathBuf;
use url::Url;

/// Relative path of a URL's cache entry below a cache root
pub fn url_to_entry_path(url: &Url) -> PathBuf {
    let mut path = PathBuf::from(url.scheme());
    path.push(host_dir(url));
    path.push(hash_path_and_query(url));
    path
}

/// Directory name for the URL's authority
///
/// The `url` crate already lowercases the host. An explicit port gets a
/// `_PORT` suffix so `example.com` and `example.com:8080` never collide.
fn host_dir(url: &Url) -> String {
    let host = url.host_str().unwrap_or("unknown");
    match url.port() {
        Some(port) => format!("{}_PORT{}", host, port),
        None => host.to_string(),
    }
}

/// Hash the path plus `?query` (when present) into a hex file name
fn hash_path_and_query(url: &Url) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.path().as_bytes());
    if let Some(query) = url.query() {
        hasher.update(b"?");
        hasher.update(query.as_bytes());
    }
    hex::encode(hasher.finalize())
}
