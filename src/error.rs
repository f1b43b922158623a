//! Error types for modcache
//!
//! All modules use `CacheResult<T>` as their return type. A missing entry is
//! never an error: every read path normalizes "not found" (and unusable
//! entries such as checksum mismatches) to `None`, so a cache miss stays
//! cheap to detect and impossible to mistake for a failure.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// All errors that can occur in modcache
#[derive(Error, Debug)]
pub enum CacheError {
    // Construction errors
    #[error("Cache root must be an absolute path: {0}")]
    RootNotAbsolute(PathBuf),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // CLI input errors
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid header (expected KEY=VALUE): {0}")]
    InvalidHeader(String),

    #[error("Not cached: {0}")]
    NotCached(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CacheError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
