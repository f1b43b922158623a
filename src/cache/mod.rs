//! HTTP cache for module resolution
//!
//! Stores fetched bytes and response headers keyed by URL so repeated
//! resolution of the same remote resource avoids network access.
//!
//! Two tiers exist: a canonical global cache and an optional project-local
//! vendor cache that mirrors global entries for reproducible builds. The
//! [`HttpCache`] facade picks a tier lazily on first use and degrades writes
//! to silent no-ops when the environment is read-only; caching is a
//! best-effort optimization, never a correctness requirement.
//!
//! Entries are never evicted by this crate; staleness is the caller's call.

pub mod entry;
pub mod global;
pub mod local;

pub use entry::{CacheEntry, EntryMetadata};
pub use global::GlobalHttpCache;
pub use local::LocalHttpCache;

use crate::error::{CacheError, CacheResult};
use crate::store;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;
use url::Url;

/// Options for constructing an [`HttpCache`]
#[derive(Debug, Clone)]
pub struct CreateOptions {
    /// Global cache root; must be absolute
    pub root: PathBuf,

    /// Vendor cache root; must be absolute when present. Present means the
    /// facade operates in local (vendor) mode.
    pub vendor_root: Option<PathBuf>,

    /// Explicit read-only override. `None` defers to a writability probe of
    /// the active root, run at most once, on the first `set`.
    pub read_only: Option<bool>,
}

impl CreateOptions {
    /// Global-mode options with everything else defaulted
    pub fn global(root: PathBuf) -> Self {
        Self {
            root,
            vendor_root: None,
            read_only: None,
        }
    }
}

/// Per-read options for [`HttpCache::get`]
#[derive(Debug, Clone)]
pub struct GetOptions<'a> {
    /// Expected sha256 of the body, hex-encoded. Only evaluated against the
    /// global tier; vendored entries are trusted as-is.
    pub checksum: Option<&'a str>,

    /// Allow promoting a global hit into the vendor cache (local mode only)
    pub allow_copy_global_to_local: bool,
}

impl Default for GetOptions<'_> {
    fn default() -> Self {
        Self {
            checksum: None,
            allow_copy_global_to_local: true,
        }
    }
}

enum Backing {
    Global(GlobalHttpCache),
    Local(LocalHttpCache),
}

/// Facade over the global and vendor cache tiers
///
/// The backing tier and the read-only flag are each resolved once, lazily,
/// and pinned for the instance's lifetime. [`HttpCache::free`] releases the
/// backing cache and is idempotent; `Drop` calls it on every exit path.
pub struct HttpCache {
    options: CreateOptions,
    backing: OnceCell<Backing>,
    read_only: OnceCell<bool>,
}

impl HttpCache {
    /// Validate roots and build an uninitialized facade
    ///
    /// Non-absolute roots are a configuration error and fail here, not at
    /// first use.
    pub fn new(options: CreateOptions) -> CacheResult<Self> {
        if !options.root.is_absolute() {
            return Err(CacheError::RootNotAbsolute(options.root));
        }
        if let Some(vendor_root) = &options.vendor_root {
            if !vendor_root.is_absolute() {
                return Err(CacheError::RootNotAbsolute(vendor_root.clone()));
            }
        }
        Ok(Self {
            options,
            backing: OnceCell::new(),
            read_only: OnceCell::new(),
        })
    }

    /// Cached response headers for `url`
    pub fn headers(&self, url: &Url) -> CacheResult<Option<HashMap<String, String>>> {
        match self.backing() {
            Backing::Global(cache) => cache.headers(url),
            Backing::Local(cache) => cache.headers(url),
        }
    }

    /// Cached body bytes for `url`
    pub fn get(&self, url: &Url, options: GetOptions<'_>) -> CacheResult<Option<Vec<u8>>> {
        match self.backing() {
            Backing::Global(cache) => cache.bytes(url, options.checksum),
            Backing::Local(cache) => {
                cache.bytes(url, options.checksum, options.allow_copy_global_to_local)
            }
        }
    }

    /// When the entry for `url` was last written
    pub fn modified_time(&self, url: &Url) -> CacheResult<Option<SystemTime>> {
        match self.backing() {
            Backing::Global(cache) => cache.modified_time(url),
            Backing::Local(cache) => cache.modified_time(url),
        }
    }

    /// Whether an entry exists for `url` in the active tier
    pub fn contains(&self, url: &Url) -> bool {
        match self.backing() {
            Backing::Global(cache) => cache.contains(url),
            Backing::Local(cache) => cache.contains(url),
        }
    }

    /// On-disk path the active tier uses for `url`
    pub fn entry_path(&self, url: &Url) -> PathBuf {
        match self.backing() {
            Backing::Global(cache) => cache.entry_path(url),
            Backing::Local(cache) => cache.entry_path(url),
        }
    }

    /// Store headers and body for `url`
    ///
    /// A silent no-op when the cache is read-only; the write is dropped, not
    /// queued and not an error.
    pub fn set(
        &self,
        url: &Url,
        headers: HashMap<String, String>,
        body: &[u8],
    ) -> CacheResult<()> {
        if self.is_read_only() {
            debug!("Cache is read-only, dropping write for {}", url);
            return Ok(());
        }
        match self.backing() {
            Backing::Global(cache) => cache.set(url, headers, body),
            Backing::Local(cache) => cache.set(url, headers, body),
        }
    }

    /// Release the backing cache; idempotent
    pub fn free(&mut self) {
        self.backing.take();
    }

    fn backing(&self) -> &Backing {
        self.backing.get_or_init(|| match &self.options.vendor_root {
            Some(vendor_root) => {
                debug!("Using vendor cache at {}", vendor_root.display());
                Backing::Local(LocalHttpCache::new(
                    vendor_root.clone(),
                    self.options.root.clone(),
                ))
            }
            None => {
                debug!("Using global cache at {}", self.options.root.display());
                Backing::Global(GlobalHttpCache::new(self.options.root.clone()))
            }
        })
    }

    /// Read-only status, resolved at most once
    fn is_read_only(&self) -> bool {
        *self.read_only.get_or_init(|| {
            self.options.read_only.unwrap_or_else(|| {
                let writable = store::dir_is_writable(self.write_root());
                if !writable {
                    debug!(
                        "Cache root {} is not writable, entering read-only mode",
                        self.write_root().display()
                    );
                }
                !writable
            })
        })
    }

    /// The root that `set` would write to
    fn write_root(&self) -> &Path {
        self.options
            .vendor_root
            .as_deref()
            .unwrap_or(&self.options.root)
    }
}

impl Drop for HttpCache {
    fn drop(&mut self) {
        self.free();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn relative_root_rejected_at_construction() {
        let result = HttpCache::new(CreateOptions::global(PathBuf::from("relative/cache")));
        assert!(matches!(result, Err(CacheError::RootNotAbsolute(_))));
    }

    #[test]
    fn relative_vendor_root_rejected_at_construction() {
        let dir = TempDir::new().unwrap();
        let result = HttpCache::new(CreateOptions {
            root: dir.path().to_path_buf(),
            vendor_root: Some(PathBuf::from("vendor")),
            read_only: None,
        });
        assert!(matches!(result, Err(CacheError::RootNotAbsolute(_))));
    }

    #[test]
    fn global_mode_roundtrip() {
        let dir = TempDir::new().unwrap();
        let cache = HttpCache::new(CreateOptions::global(dir.path().to_path_buf())).unwrap();
        let u = url("https://deno.land/x/mod.ts");
        let h = headers(&[("content-type", "application/typescript")]);

        cache.set(&u, h.clone(), b"export {};").unwrap();

        assert_eq!(
            cache.get(&u, GetOptions::default()).unwrap(),
            Some(b"export {};".to_vec())
        );
        assert_eq!(cache.headers(&u).unwrap(), Some(h));
        assert!(cache.contains(&u));
        assert!(cache.modified_time(&u).unwrap().is_some());
    }

    #[test]
    fn vendor_root_selects_local_mode() {
        let global_dir = TempDir::new().unwrap();
        let vendor_dir = TempDir::new().unwrap();

        // Populate the global tier directly.
        let global = GlobalHttpCache::new(global_dir.path().to_path_buf());
        let u = url("https://deno.land/x/mod.ts");
        global.set(&u, headers(&[]), b"from global").unwrap();

        let cache = HttpCache::new(CreateOptions {
            root: global_dir.path().to_path_buf(),
            vendor_root: Some(vendor_dir.path().to_path_buf()),
            read_only: None,
        })
        .unwrap();

        // Facade entry paths point into the vendor dir in local mode.
        assert!(cache.entry_path(&u).starts_with(vendor_dir.path()));

        // Read promotes into the vendor dir.
        assert_eq!(
            cache.get(&u, GetOptions::default()).unwrap(),
            Some(b"from global".to_vec())
        );
        assert!(cache.contains(&u));
    }

    #[test]
    fn no_copy_option_blocks_promotion() {
        let global_dir = TempDir::new().unwrap();
        let vendor_dir = TempDir::new().unwrap();
        let global = GlobalHttpCache::new(global_dir.path().to_path_buf());
        let u = url("https://deno.land/x/mod.ts");
        global.set(&u, headers(&[]), b"from global").unwrap();

        let cache = HttpCache::new(CreateOptions {
            root: global_dir.path().to_path_buf(),
            vendor_root: Some(vendor_dir.path().to_path_buf()),
            read_only: None,
        })
        .unwrap();

        let options = GetOptions {
            allow_copy_global_to_local: false,
            ..GetOptions::default()
        };
        assert_eq!(cache.get(&u, options).unwrap(), None);
    }

    #[test]
    fn read_only_set_is_silent_noop() {
        let dir = TempDir::new().unwrap();
        let cache = HttpCache::new(CreateOptions {
            root: dir.path().to_path_buf(),
            vendor_root: None,
            read_only: Some(true),
        })
        .unwrap();
        let u = url("https://deno.land/x/mod.ts");

        cache.set(&u, headers(&[]), b"dropped").unwrap();

        assert_eq!(cache.get(&u, GetOptions::default()).unwrap(), None);
    }

    #[test]
    fn read_only_reads_still_work() {
        let dir = TempDir::new().unwrap();

        let writer = HttpCache::new(CreateOptions::global(dir.path().to_path_buf())).unwrap();
        let u = url("https://deno.land/x/mod.ts");
        writer.set(&u, headers(&[]), b"existing").unwrap();

        let reader = HttpCache::new(CreateOptions {
            root: dir.path().to_path_buf(),
            vendor_root: None,
            read_only: Some(true),
        })
        .unwrap();
        assert_eq!(
            reader.get(&u, GetOptions::default()).unwrap(),
            Some(b"existing".to_vec())
        );
    }

    #[test]
    fn free_is_idempotent_and_root_remains_usable() {
        let dir = TempDir::new().unwrap();
        let u = url("https://deno.land/x/mod.ts");

        let mut cache = HttpCache::new(CreateOptions::global(dir.path().to_path_buf())).unwrap();
        cache.set(&u, headers(&[]), b"kept").unwrap();
        cache.free();
        cache.free();
        drop(cache);

        // A fresh instance over the same root still sees the entry.
        let fresh = HttpCache::new(CreateOptions::global(dir.path().to_path_buf())).unwrap();
        assert_eq!(
            fresh.get(&u, GetOptions::default()).unwrap(),
            Some(b"kept".to_vec())
        );
    }

    #[test]
    fn free_before_first_use_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let mut cache = HttpCache::new(CreateOptions::global(dir.path().to_path_buf())).unwrap();
        cache.free();
    }
}
