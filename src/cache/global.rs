//! Global cache tier
//!
//! Canonical, process-wide URL-to-entry store rooted at one directory.
//! Reads can be gated on an expected sha256 checksum: a mismatch means the
//! entry is corrupt or stale and is reported as absent so the caller
//! re-fetches, rather than failing the lookup.

use crate::cache::entry::{self, CacheEntry, EntryMetadata};
use crate::error::{CacheError, CacheResult};
use crate::key;
use crate::store;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;
use url::Url;

/// Process-wide cache over one root directory
#[derive(Debug, Clone)]
pub struct GlobalHttpCache {
    root: PathBuf,
}

impl GlobalHttpCache {
    /// Pure construction; no I/O happens until the first operation
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The cache root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// On-disk path of the entry for `url`
    pub fn entry_path(&self, url: &Url) -> PathBuf {
        self.root.join(key::url_to_entry_path(url))
    }

    /// Whether an entry exists for `url` (cheap stat, no validation)
    pub fn contains(&self, url: &Url) -> bool {
        store::is_file(&self.entry_path(url))
    }

    /// Cached response headers for `url`; `None` if never cached
    pub fn headers(&self, url: &Url) -> CacheResult<Option<HashMap<String, String>>> {
        let path = self.entry_path(url);
        let Some(bytes) = store::read(&path)
            .map_err(|e| CacheError::io(format!("reading cache entry for {}", url), e))?
        else {
            return Ok(None);
        };
        Ok(entry::parse_metadata(&bytes).map(|metadata| metadata.headers))
    }

    /// Cached body bytes for `url`
    ///
    /// With `checksum` set, the bytes are verified against it after reading;
    /// a mismatch yields `None`.
    pub fn bytes(&self, url: &Url, checksum: Option<&str>) -> CacheResult<Option<Vec<u8>>> {
        Ok(self.entry(url, checksum)?.map(|entry| entry.body))
    }

    /// When the entry for `url` was last written; `None` if never cached
    pub fn modified_time(&self, url: &Url) -> CacheResult<Option<SystemTime>> {
        store::modified(&self.entry_path(url))
            .map_err(|e| CacheError::io(format!("stat of cache entry for {}", url), e))
    }

    /// Store headers and body for `url` as one atomically written entry
    pub fn set(
        &self,
        url: &Url,
        headers: HashMap<String, String>,
        body: &[u8],
    ) -> CacheResult<()> {
        let metadata = EntryMetadata::new(url.to_string(), headers);
        let bytes = entry::serialize(body, &metadata)?;
        store::atomic_write(&self.entry_path(url), &bytes)
            .map_err(|e| CacheError::io(format!("writing cache entry for {}", url), e))?;
        debug!("Cached {} ({} bytes)", url, body.len());
        Ok(())
    }

    /// Read and validate the full entry for `url`
    pub(crate) fn entry(
        &self,
        url: &Url,
        checksum: Option<&str>,
    ) -> CacheResult<Option<CacheEntry>> {
        let path = self.entry_path(url);
        let Some(bytes) = store::read(&path)
            .map_err(|e| CacheError::io(format!("reading cache entry for {}", url), e))?
        else {
            return Ok(None);
        };

        let Some(entry) = entry::parse(bytes) else {
            debug!("Ignoring unparsable cache entry for {}", url);
            return Ok(None);
        };

        if let Some(expected) = checksum {
            let actual = hex::encode(Sha256::digest(&entry.body));
            if !actual.eq_ignore_ascii_case(expected) {
                debug!(
                    "Checksum mismatch for {}: expected {}, got {}",
                    url, expected, actual
                );
                return Ok(None);
            }
        }

        Ok(Some(entry))
    }
}
