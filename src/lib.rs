//! Modcache - persistent HTTP cache for module resolution toolchains
//!
//! Stores fetched bytes and response headers keyed by URL, with a global
//! tier and an optional project-local vendor tier, atomic persistence and
//! checksum-gated reads.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod key;
pub mod store;

pub use cache::{CreateOptions, GetOptions, GlobalHttpCache, HttpCache, LocalHttpCache};
pub use error::{CacheError, CacheResult};
