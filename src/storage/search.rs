//! Search
//!
//! Point lookups against a single SSTable file.

use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::error::Result;

use super::sstable::{Lookup, SSTableReader};

/// Look up `key` in the SSTable at `path` with default settings
pub fn search(path: &Path, key: &str) -> Result<Lookup> {
    search_with_config(path, key, &Config::default())
}

/// Look up `key` in the SSTable at `path`
///
/// Outcomes are kept apart:
/// - `Ok(Found(value))` / `Ok(NotFound)` — the scan completed
/// - `Err(Io)` — the file could not be opened or read
/// - `Err(Corruption)` / `Err(UnsupportedVersion)` — the file is not a
///   valid table
///
/// The file is closed on every return path.
pub fn search_with_config(path: &Path, key: &str, config: &Config) -> Result<Lookup> {
    let mut reader = SSTableReader::open_with_config(path, config)?;
    reader.search(key)
}

/// Look up `key`, collapsing every failure into "not found"
///
/// Returns `(value, true)` on a hit and `("", false)` otherwise. Errors are
/// only logged, so callers cannot tell a missing file from a missing key.
/// Prefer [`search`] unless that conflation is wanted.
pub fn search_lenient(path: &Path, key: &str) -> (String, bool) {
    match search(path, key) {
        Ok(Lookup::Found(value)) => (value, true),
        Ok(Lookup::NotFound) => (String::new(), false),
        Err(e) => {
            // The reader already logged the failure at warn level
            debug!(path = %path.display(), key, error = %e, "Lookup failed, reporting not found");
            (String::new(), false)
        }
    }
}
