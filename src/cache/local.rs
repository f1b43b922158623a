//! Local (vendor) cache tier
//!
//! Project-scoped mirror of a subset of the global cache, kept alongside a
//! project for reproducible and offline builds. Reads consult the local
//! store first; on a local miss the global cache can act as a fallback
//! source, in which case the entry is promoted (copied) into the local store
//! so later reads never touch the global tier again.
//!
//! Local entries are trusted as-is and never checksum-validated; the
//! checksum gate applies only when pulling from the global tier.

use crate::cache::global::GlobalHttpCache;
use crate::error::CacheResult;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;
use url::Url;

/// Vendor-directory cache with the global cache as fallback source
///
/// Both tiers share the same on-disk layout, so the vendor store is itself a
/// [`GlobalHttpCache`] rooted at the vendor directory.
#[derive(Debug, Clone)]
pub struct LocalHttpCache {
    local: GlobalHttpCache,
    global: GlobalHttpCache,
}

impl LocalHttpCache {
    /// Pure construction; no I/O happens until the first operation
    pub fn new(vendor_root: PathBuf, global_root: PathBuf) -> Self {
        Self {
            local: GlobalHttpCache::new(vendor_root),
            global: GlobalHttpCache::new(global_root),
        }
    }

    /// The vendor root directory
    pub fn vendor_root(&self) -> &Path {
        self.local.root()
    }

    /// On-disk path of the local entry for `url`
    pub fn entry_path(&self, url: &Url) -> PathBuf {
        self.local.entry_path(url)
    }

    /// Whether a local entry exists for `url`
    pub fn contains(&self, url: &Url) -> bool {
        self.local.contains(url)
    }

    /// Cached response headers for `url`, from the local store only
    pub fn headers(&self, url: &Url) -> CacheResult<Option<HashMap<String, String>>> {
        self.local.headers(url)
    }

    /// Cached body bytes for `url`
    ///
    /// A local hit wins unconditionally. On a local miss with
    /// `allow_copy_global_to_local` set, a global hit (checksum-gated) is
    /// promoted into the local store before the bytes are returned. With the
    /// flag unset a local miss is final, whatever the global tier holds.
    pub fn bytes(
        &self,
        url: &Url,
        checksum: Option<&str>,
        allow_copy_global_to_local: bool,
    ) -> CacheResult<Option<Vec<u8>>> {
        if let Some(entry) = self.local.entry(url, None)? {
            return Ok(Some(entry.body));
        }
        if !allow_copy_global_to_local {
            return Ok(None);
        }

        let Some(entry) = self.global.entry(url, checksum)? else {
            return Ok(None);
        };
        debug!("Promoting {} from global cache into vendor dir", url);
        self.local
            .set(url, entry.metadata.headers.clone(), &entry.body)?;
        Ok(Some(entry.body))
    }

    /// When the entry for `url` was last written, local tier first
    pub fn modified_time(&self, url: &Url) -> CacheResult<Option<SystemTime>> {
        match self.local.modified_time(url)? {
            Some(time) => Ok(Some(time)),
            None => self.global.modified_time(url),
        }
    }

    /// Store headers and body in the local store; never writes through to
    /// the global tier
    pub fn set(
        &self,
        url: &Url,
        headers: HashMap<String, String>,
        body: &[u8],
    ) -> CacheResult<()> {
        self.local.set(url, headers, body)
    }
}
