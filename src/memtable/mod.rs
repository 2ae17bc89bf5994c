//! MemTable Module
//!
//! In-memory buffer for pending writes.
//!
//! ## Responsibilities
//! - Fast inserts and point reads in memory
//! - Last-write-wins: one value per key
//! - Track approximate size for flush decisions
//! - Sorted snapshot for SSTable creation
//!
//! ## Data Structure Choice
//! Using a plain HashMap:
//! - Storage is unordered, ordering is imposed once at flush time
//! - Exclusive `&mut self` writes, no internal locking
//! - Callers that share a memtable across threads bring their own lock

mod table;

pub use table::MemTable;
