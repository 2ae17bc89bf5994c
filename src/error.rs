//! Error types for sstkv
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using SstError
pub type Result<T> = std::result::Result<T, SstError>;

/// Unified error type for sstkv operations
#[derive(Debug, Error)]
pub enum SstError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Write Path Errors
    // -------------------------------------------------------------------------
    #[error("Record too large: {field} is {len} bytes (max {max})")]
    RecordTooLarge {
        field: &'static str,
        len: usize,
        max: u32,
    },

    #[error("Keys out of order: {key:?} does not sort after {previous:?}")]
    OutOfOrder { previous: String, key: String },

    // -------------------------------------------------------------------------
    // Read Path Errors
    // -------------------------------------------------------------------------
    #[error("SSTable corruption detected: {0}")]
    Corruption(String),

    #[error("Unsupported SSTable version: {0}")]
    UnsupportedVersion(u16),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SstError {
    /// True if the error came from the underlying file system rather than
    /// from the contents of a table
    pub fn is_io(&self) -> bool {
        matches!(self, SstError::Io(_))
    }

    /// True if a table was readable but its bytes are not a valid table
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            SstError::Corruption(_) | SstError::UnsupportedVersion(_)
        )
    }
}
