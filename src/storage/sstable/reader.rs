//! SSTable Reader
//!
//! Opens SSTable files and resolves point lookups with a linear scan.

use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::codec::decode_record;
use crate::config::Config;
use crate::error::{Result, SstError};

use super::iterator::SSTableIterator;
use super::{read_header, Lookup, HEADER_SIZE};

/// Reader for SSTable files
///
/// The file handle is owned by the reader and closed when it is dropped.
pub struct SSTableReader {
    /// Path the reader was opened from
    path: PathBuf,
    /// File handle for reading records
    file: BufReader<File>,
    /// Format version from the header
    version: u16,
    /// Upper bound on key/value length accepted while decoding
    max_field_len: u32,
}

impl SSTableReader {
    /// Open an SSTable for reading with default settings
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_config(path, &Config::default())
    }

    /// Open an SSTable for reading
    ///
    /// Validates the header; records are not read until a lookup or
    /// iteration.
    pub fn open_with_config(path: &Path, config: &Config) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Cannot open SSTable");
            SstError::Io(e)
        })?;

        let mut file = BufReader::with_capacity(config.read_buffer_size, file);
        let version = read_header(&mut file).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Invalid SSTable header");
            e
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            version,
            max_field_len: config.max_field_len,
        })
    }

    /// Look up a key by scanning records from the start of the table
    ///
    /// Returns:
    /// - `Ok(Found(value))` — first record with an equal key; scanning stops
    /// - `Ok(NotFound)` — reached the end of the table without a match
    /// - `Err(Corruption)` / `Err(Io)` — the scan could not finish
    ///
    /// Sortedness is not used to stop early: a miss decodes every record.
    pub fn search(&mut self, key: &str) -> Result<Lookup> {
        self.file.seek(SeekFrom::Start(HEADER_SIZE))?;

        let mut scanned: u64 = 0;
        loop {
            let record = match decode_record(&mut self.file, self.max_field_len) {
                Ok(Some(record)) => record,
                Ok(None) => break,
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        after_records = scanned,
                        error = %e,
                        "SSTable scan failed"
                    );
                    return Err(e);
                }
            };
            scanned += 1;

            if record.key == key {
                debug!(path = %self.path.display(), key, scanned, "SSTable hit");
                return Ok(Lookup::Found(record.value));
            }
        }

        debug!(path = %self.path.display(), key, scanned, "SSTable miss");
        Ok(Lookup::NotFound)
    }

    /// Create an iterator over all records (debugging, dumps, merges)
    pub fn iter(&mut self) -> Result<SSTableIterator<'_>> {
        SSTableIterator::new(&mut self.file, self.max_field_len)
    }

    /// Format version read from the header
    pub fn version(&self) -> u16 {
        self.version
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
