//! MemTable implementation
//!
//! HashMap-based memtable, owned by a single caller.

use std::collections::HashMap;
use std::path::Path;

use crate::codec::Record;
use crate::error::Result;
use crate::storage::{self, SSTable};

/// In-memory table for pending writes
#[derive(Debug, Default, Clone)]
pub struct MemTable {
    /// Current value for every key
    data: HashMap<String, String>,
    /// Sum of key and value lengths of live entries
    size: usize,
}

impl MemTable {
    /// Create a new empty MemTable
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a key-value pair, replacing any previous value for the key
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        let key_len = key.len();
        let value_len = value.len();
        match self.data.insert(key, value) {
            // Key already counted; swap the value length
            Some(old) => self.size = self.size - old.len() + value_len,
            None => self.size += key_len + value_len,
        }
    }

    /// Get the current value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// True if the key has a value
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if no key has been put
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Approximate payload size in bytes (keys + values)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if should flush (size >= limit)
    pub fn should_flush(&self, size_limit: usize) -> bool {
        self.size >= size_limit
    }

    /// Current key set, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Current entries sorted ascending by key (byte-wise)
    ///
    /// This is the view a flush writes to disk.
    pub fn snapshot(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .data
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Consume the memtable, returning its records sorted by key
    pub fn into_sorted_records(self) -> Vec<Record> {
        let mut records: Vec<Record> = self
            .data
            .into_iter()
            .map(|(key, value)| Record { key, value })
            .collect();
        records.sort_unstable_by(|a, b| a.key.cmp(&b.key));
        records
    }

    /// Flush this memtable to a new SSTable at `path`
    pub fn flush_to(&self, path: &Path) -> Result<SSTable> {
        storage::flush(self, path)
    }
}
