//! Storage Module
//!
//! Persistent storage layer: one memtable flush produces one immutable,
//! sorted SSTable file; point lookups scan that file.
//!
//! ## Responsibilities
//! - Persist a memtable to disk in sorted key order
//! - Resolve point lookups by a sequential scan of one table
//! - Report write-path failures to the caller, never swallow them
//! - Distinguish "not found" from I/O failure and corruption on reads
//!
//! Not provided: WAL, atomic file replacement, compaction, indexes, bloom
//! filters. A lookup always decodes records front to back.

mod flush;
mod search;
pub mod sstable;

pub use flush::{flush, flush_with_config};
pub use search::{search, search_lenient, search_with_config};
pub use sstable::{Lookup, SSTable, SSTableBuilder, SSTableIterator, SSTableReader};
