//! SSTable Builder
//!
//! Writes sorted key-value records to a new SSTable file.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::codec::encode_record;
use crate::config::Config;
use crate::error::{Result, SstError};

use super::{write_header, SSTable, HEADER_SIZE};

/// Builder for creating new SSTables from sorted records
///
/// Opening the builder truncates any existing file at `path`. The write is
/// not atomic: if `add()` or `finish()` fails, the file is left partially
/// written and is not cleaned up.
pub struct SSTableBuilder {
    /// Output file path
    path: PathBuf,
    /// Buffered writer for performance
    writer: BufWriter<File>,
    /// Number of records written
    record_count: u64,
    /// Bytes written so far, header included
    bytes_written: u64,
    /// First key added
    min_key: Option<String>,
    /// Last key added; every new key must sort strictly after it
    max_key: Option<String>,
    /// Upper bound on key/value length
    max_field_len: u32,
    /// fsync in finish()
    sync_on_finish: bool,
}

impl SSTableBuilder {
    /// Create a new SSTable builder with default settings
    pub fn new(path: &Path) -> Result<Self> {
        Self::with_config(path, &Config::default())
    }

    /// Create a new SSTable builder
    ///
    /// Writes header immediately; call `add()` in strictly ascending key
    /// order, then `finish()` to flush the buffer to disk.
    pub fn with_config(path: &Path, config: &Config) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        let mut writer = BufWriter::with_capacity(config.write_buffer_size, file);
        write_header(&mut writer)?;

        debug!(path = %path.display(), "Created SSTable");

        Ok(Self {
            path: path.to_path_buf(),
            writer,
            record_count: 0,
            bytes_written: HEADER_SIZE,
            min_key: None,
            max_key: None,
            max_field_len: config.max_field_len,
            sync_on_finish: config.sync_on_flush,
        })
    }

    /// Add a key-value pair (must be called in strictly ascending key order)
    pub fn add(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(previous) = &self.max_key {
            if key <= previous.as_str() {
                return Err(SstError::OutOfOrder {
                    previous: previous.clone(),
                    key: key.to_string(),
                });
            }
        }

        let written = encode_record(&mut self.writer, key, value, self.max_field_len)?;
        trace!(key, bytes = written, "Wrote record");

        if self.min_key.is_none() {
            self.min_key = Some(key.to_string());
        }
        self.max_key = Some(key.to_string());
        self.bytes_written += written as u64;
        self.record_count += 1;

        Ok(())
    }

    /// Number of records added so far
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Bytes written so far, header included
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Finish building: flush the buffer (and fsync if configured)
    pub fn finish(mut self) -> Result<SSTable> {
        self.writer.flush()?;

        let file = self
            .writer
            .into_inner()
            .map_err(|e| SstError::Io(e.into_error()))?;

        if self.sync_on_finish {
            file.sync_all()?;
        }

        let file_size = file.metadata()?.len();

        debug!(
            path = %self.path.display(),
            records = self.record_count,
            bytes = file_size,
            "Finished SSTable"
        );

        Ok(SSTable {
            path: self.path,
            record_count: self.record_count,
            min_key: self.min_key.unwrap_or_default(),
            max_key: self.max_key.unwrap_or_default(),
            file_size,
        })
    }
}
