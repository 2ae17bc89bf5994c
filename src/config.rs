//! Configuration for sstkv
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, SstError};

/// Default buffer size for table reads and writes (64 KB)
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Default upper bound on the length of a single key or value (16 MB)
pub const DEFAULT_MAX_FIELD_LEN: u32 = 16 * 1024 * 1024;

/// Main configuration for flushing and reading tables
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Location
    // -------------------------------------------------------------------------
    /// Directory holding table files
    pub data_dir: PathBuf,

    /// File name of the table inside `data_dir`
    pub table_file: String,

    // -------------------------------------------------------------------------
    // I/O
    // -------------------------------------------------------------------------
    /// Capacity of the BufWriter used by flush
    pub write_buffer_size: usize,

    /// Capacity of the BufReader used by search
    pub read_buffer_size: usize,

    /// fsync the table file after the buffer is flushed
    pub sync_on_flush: bool,

    // -------------------------------------------------------------------------
    // Record Limits
    // -------------------------------------------------------------------------
    /// Max length in bytes of a key or a value, enforced on encode and decode
    pub max_field_len: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            table_file: "sstable.sst".to_string(),
            write_buffer_size: DEFAULT_BUFFER_SIZE,
            read_buffer_size: DEFAULT_BUFFER_SIZE,
            sync_on_flush: true,
            max_field_len: DEFAULT_MAX_FIELD_LEN,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Full path of the table file
    pub fn table_path(&self) -> PathBuf {
        self.data_dir.join(&self.table_file)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the table file name
    pub fn table_file(mut self, name: impl Into<String>) -> Self {
        self.config.table_file = name.into();
        self
    }

    /// Set the write buffer capacity (in bytes)
    pub fn write_buffer_size(mut self, size: usize) -> Self {
        self.config.write_buffer_size = size;
        self
    }

    /// Set the read buffer capacity (in bytes)
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.config.read_buffer_size = size;
        self
    }

    /// Enable or disable fsync at the end of a flush
    pub fn sync_on_flush(mut self, sync: bool) -> Self {
        self.config.sync_on_flush = sync;
        self
    }

    /// Set the maximum key/value length (in bytes)
    pub fn max_field_len(mut self, len: u32) -> Self {
        self.config.max_field_len = len;
        self
    }

    pub fn build(self) -> Result<Config> {
        let config = self.config;

        if config.write_buffer_size == 0 {
            return Err(SstError::Config("write_buffer_size must be > 0".to_string()));
        }
        if config.read_buffer_size == 0 {
            return Err(SstError::Config("read_buffer_size must be > 0".to_string()));
        }
        if config.max_field_len == 0 {
            return Err(SstError::Config("max_field_len must be > 0".to_string()));
        }
        if config.table_file.is_empty() {
            return Err(SstError::Config("table_file must not be empty".to_string()));
        }

        Ok(config)
    }
}
