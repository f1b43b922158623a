//! On-disk cache entry format
//!
//! An entry is a single file: the response body followed by one trailing
//! line of metadata.
//!
//! # File format
//!
//! `<body>\n// modcache-metadata=<json><EOF>`
//!
//! Headers and body share one file so a single atomic rename publishes both
//! together; no reader can ever observe one without the other. A file whose
//! trailing line does not parse is treated as absent (the caller re-fetches),
//! never as an error.

use crate::error::CacheResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const METADATA_PREFIX: &[u8] = b"\n// modcache-metadata=";

/// Metadata stored on the entry's trailing line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryMetadata {
    /// The URL this entry was fetched from
    pub url: String,

    /// Response headers (insertion order irrelevant)
    pub headers: HashMap<String, String>,

    /// When the entry was written (RFC 3339)
    pub cached_at: DateTime<Utc>,
}

impl EntryMetadata {
    /// Metadata for an entry cached now
    pub fn new(url: impl Into<String>, headers: HashMap<String, String>) -> Self {
        Self {
            url: url.into(),
            headers,
            cached_at: Utc::now(),
        }
    }
}

/// A parsed cache entry
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub metadata: EntryMetadata,
    pub body: Vec<u8>,
}

/// Serialize body and metadata into the single-file entry format
pub fn serialize(body: &[u8], metadata: &EntryMetadata) -> CacheResult<Vec<u8>> {
    let json = serde_json::to_vec(metadata)?;
    let mut out = Vec::with_capacity(body.len() + METADATA_PREFIX.len() + json.len());
    out.extend_from_slice(body);
    out.extend_from_slice(METADATA_PREFIX);
    out.extend_from_slice(&json);
    Ok(out)
}

/// Parse a full entry; `None` when the file is not a valid entry
pub fn parse(file_bytes: Vec<u8>) -> Option<CacheEntry> {
    let (body_len, metadata) = split(&file_bytes)?;
    let mut body = file_bytes;
    body.truncate(body_len);
    Some(CacheEntry { metadata, body })
}

/// Parse only the metadata line, without copying the body
pub fn parse_metadata(file_bytes: &[u8]) -> Option<EntryMetadata> {
    split(file_bytes).map(|(_, metadata)| metadata)
}

/// Split at the last newline; everything after must be the metadata line
fn split(file_bytes: &[u8]) -> Option<(usize, EntryMetadata)> {
    let last_newline = file_bytes.iter().rposition(|&b| b == b'\n')?;
    let (body, trailing) = file_bytes.split_at(last_newline);
    let json = trailing.strip_prefix(METADATA_PREFIX)?;
    let metadata = serde_json::from_slice(json).ok()?;
    Some((body.len(), metadata))
}
