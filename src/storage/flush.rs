//! Flush
//!
//! Drains a memtable into a new SSTable file.

use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::memtable::MemTable;

use super::sstable::{SSTable, SSTableBuilder};

/// Flush `memtable` to a new SSTable at `path` with default settings
pub fn flush(memtable: &MemTable, path: &Path) -> Result<SSTable> {
    flush_with_config(memtable, path, &Config::default())
}

/// Flush `memtable` to a new SSTable at `path`
///
/// Steps:
/// 1. Snapshot the memtable, sorted ascending by key
/// 2. Create or truncate the destination file
/// 3. Stream-encode every record through a buffered writer
/// 4. Flush the buffer (and fsync if configured)
///
/// An existing file at `path` is overwritten in place, not replaced
/// atomically. On error the file may be partially written. An empty memtable
/// produces a valid table holding only the header.
pub fn flush_with_config(memtable: &MemTable, path: &Path, config: &Config) -> Result<SSTable> {
    let entries = memtable.snapshot();
    debug!(path = %path.display(), records = entries.len(), "Flushing memtable");

    let mut builder = SSTableBuilder::with_config(path, config)?;
    for (key, value) in entries {
        builder.add(key, value)?;
    }
    let sstable = builder.finish()?;

    debug!(
        path = %sstable.path.display(),
        records = sstable.record_count,
        bytes = sstable.file_size,
        "Flushed memtable to SSTable"
    );

    Ok(sstable)
}
