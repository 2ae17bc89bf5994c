//! SSTable Module
//!
//! Sorted String Table - immutable on-disk sorted key-value storage.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Header (6 bytes)                                        │
//! │   Magic: "SSKV" (4) | Version: u16 (2)                  │
//! ├─────────────────────────────────────────────────────────┤
//! │ Records (variable, strictly ascending by key)           │
//! │   [KeyLen: u32][ValLen: u32][Key][Value][CRC32: u32]    │
//! │   ... repeated until end of file ...                    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no entry count, index or footer. An empty table is just the
//! header. Record framing lives in [`crate::codec`].

mod builder;
mod iterator;
mod reader;

use std::io::{ErrorKind, Read, Write};
use std::path::PathBuf;

use bytes::{Buf, BufMut};

use crate::error::{Result, SstError};

pub use builder::SSTableBuilder;
pub use iterator::SSTableIterator;
pub use reader::SSTableReader;

// =============================================================================
// Shared Constants (used by builder, reader, iterator)
// =============================================================================

/// Magic bytes identifying an sstkv SSTable file
pub const MAGIC: &[u8; 4] = b"SSKV";

/// Current SSTable format version
pub const VERSION: u16 = 1;

/// Header size: Magic (4) + Version (2) = 6 bytes
pub const HEADER_SIZE: u64 = 6;

pub(crate) fn write_header<W: Write>(writer: &mut W) -> Result<()> {
    let mut header = Vec::with_capacity(HEADER_SIZE as usize);
    header.put_slice(MAGIC);
    header.put_u16_le(VERSION);
    writer.write_all(&header)?;
    Ok(())
}

/// Read and validate the header, returning the format version
pub(crate) fn read_header<R: Read>(reader: &mut R) -> Result<u16> {
    let mut header = [0u8; HEADER_SIZE as usize];
    reader.read_exact(&mut header).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => {
            SstError::Corruption("File too short for SSTable header".to_string())
        }
        _ => SstError::Io(e),
    })?;

    if &header[0..4] != MAGIC {
        return Err(SstError::Corruption(format!(
            "Invalid SSTable magic: expected SSKV, got {:?}",
            &header[0..4]
        )));
    }

    let mut version_bytes = &header[4..6];
    let version = version_bytes.get_u16_le();
    if version != VERSION {
        return Err(SstError::UnsupportedVersion(version));
    }

    Ok(version)
}

// =============================================================================
// SSTable Metadata
// =============================================================================

/// SSTable metadata returned by a finished build
#[derive(Debug, Clone)]
pub struct SSTable {
    /// Path to the SSTable file
    pub path: PathBuf,
    /// Number of records in this SSTable
    pub record_count: u64,
    /// Smallest key (empty for an empty table)
    pub min_key: String,
    /// Largest key (empty for an empty table)
    pub max_key: String,
    /// File size in bytes
    pub file_size: u64,
}

impl SSTable {
    /// Get the number of records
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// True if the table holds only the header
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Quick check if a key might be in this SSTable (range check)
    /// Returns false if key is definitely outside [min_key, max_key]
    pub fn might_contain(&self, key: &str) -> bool {
        !self.is_empty() && key >= self.min_key.as_str() && key <= self.max_key.as_str()
    }
}

// =============================================================================
// Lookup Outcome
// =============================================================================

/// Outcome of a point lookup that ran to completion
///
/// Failures (unreadable file, corrupt record) are reported as `Err` by the
/// lookup functions, so `NotFound` always means the whole table was scanned
/// and the key is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(String),
    NotFound,
}

impl Lookup {
    /// True for `Found`
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// Borrow the value, if found
    pub fn value(&self) -> Option<&str> {
        match self {
            Lookup::Found(v) => Some(v.as_str()),
            Lookup::NotFound => None,
        }
    }

    /// Take the value, if found
    pub fn into_option(self) -> Option<String> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::NotFound => None,
        }
    }
}
