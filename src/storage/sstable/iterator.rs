//! SSTable Iterator
//!
//! Sequential iteration over all records in an SSTable.

use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};

use crate::codec::{decode_record, Record};
use crate::error::Result;

use super::HEADER_SIZE;

/// Iterator over SSTable records in file (sorted key) order
///
/// Stops after the first error.
pub struct SSTableIterator<'a> {
    file: &'a mut BufReader<File>,
    max_field_len: u32,
    done: bool,
}

impl<'a> SSTableIterator<'a> {
    /// Create a new iterator starting right after the header
    pub(super) fn new(file: &'a mut BufReader<File>, max_field_len: u32) -> Result<Self> {
        file.seek(SeekFrom::Start(HEADER_SIZE))?;
        Ok(Self {
            file,
            max_field_len,
            done: false,
        })
    }
}

impl<'a> Iterator for SSTableIterator<'a> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match decode_record(&mut *self.file, self.max_field_len) {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
