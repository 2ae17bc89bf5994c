//! # sstkv
//!
//! A minimal key-value storage primitive:
//! - In-memory MemTable with last-write-wins semantics
//! - Flush to an immutable, sorted SSTable file
//! - Point lookups by sequential scan of one SSTable
//!
//! ## Architecture Overview
//!
//! ```text
//!   put(key, value)
//!         │
//!         ▼
//!   ┌─────────────┐   flush    ┌──────────────┐   search   ┌─────────────┐
//!   │  MemTable   │ ─────────▶ │   SSTable    │ ─────────▶ │   Lookup    │
//!   │  (HashMap)  │  sort +    │ (file, keys  │  linear    │ Found /     │
//!   └─────────────┘  encode    │  ascending)  │  decode    │ NotFound    │
//!                              └──────────────┘            └─────────────┘
//!                        both directions go through the record codec
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use sstkv::{flush, search, Lookup, MemTable};
//!
//! let mut memtable = MemTable::new();
//! memtable.put("apple", "fruit");
//! memtable.put("carrot", "vegetable");
//!
//! let path = Path::new("sstable.sst");
//! flush(&memtable, path)?;
//! assert_eq!(search(path, "carrot")?, Lookup::Found("vegetable".to_string()));
//! # Ok::<(), sstkv::SstError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod memtable;
pub mod storage;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use codec::Record;
pub use config::Config;
pub use error::{Result, SstError};
pub use memtable::MemTable;
pub use storage::{flush, flush_with_config, search, search_lenient, search_with_config};
pub use storage::{Lookup, SSTable, SSTableBuilder, SSTableReader};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of sstkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
