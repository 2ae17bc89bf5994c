//! Record codec
//!
//! Encoding and decoding of a single key-value record. The codec is the only
//! contract shared by the SSTable builder and reader.
//!
//! ## Record Format (version 1)
//! ```text
//! ┌───────────┬───────────┬───────┬─────────┬───────────┐
//! │KeyLen (4) │ValLen (4) │  Key  │  Value  │ CRC32 (4) │
//! └───────────┴───────────┴───────┴─────────┴───────────┘
//! ```
//!
//! - Integers are little-endian.
//! - CRC32 covers KeyLen, ValLen, Key and Value.
//! - Key and Value are UTF-8.
//!
//! A stream of records needs no external count: reading zero bytes at a record
//! boundary is end of stream, anything short of a full record is corruption.

use std::io::{ErrorKind, Read, Write};

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{Result, SstError};

/// Record header size: KeyLen (4) + ValLen (4)
pub const RECORD_HEADER_SIZE: usize = 8;

/// Trailing checksum size
pub const RECORD_CRC_SIZE: usize = 4;

/// A single key-value pair, the unit of storage both in memory and on disk
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Record {
    pub key: String,
    pub value: String,
}

impl Record {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Size of this record once framed on disk
    pub fn encoded_len(&self) -> usize {
        encoded_len(&self.key, &self.value)
    }

    /// Encode this record into `writer`
    pub fn encode_to<W: Write>(&self, writer: &mut W, max_field_len: u32) -> Result<usize> {
        encode_record(writer, &self.key, &self.value, max_field_len)
    }
}

/// Framed size of a key-value pair
pub fn encoded_len(key: &str, value: &str) -> usize {
    RECORD_HEADER_SIZE + key.len() + value.len() + RECORD_CRC_SIZE
}

// =============================================================================
// Encoding
// =============================================================================

/// Build the framed bytes for one record
///
/// Fails with `RecordTooLarge` if the key or value is longer than
/// `max_field_len` (which is itself capped by the u32 length prefix).
pub fn encode_frame(key: &str, value: &str, max_field_len: u32) -> Result<BytesMut> {
    let key_len = checked_len("key", key.len(), max_field_len)?;
    let val_len = checked_len("value", value.len(), max_field_len)?;

    let mut frame = BytesMut::with_capacity(encoded_len(key, value));
    frame.put_u32_le(key_len);
    frame.put_u32_le(val_len);
    frame.put_slice(key.as_bytes());
    frame.put_slice(value.as_bytes());

    let crc = crc32fast::hash(&frame);
    frame.put_u32_le(crc);

    Ok(frame)
}

/// Encode one record into `writer`, returning the number of bytes written
pub fn encode_record<W: Write>(
    writer: &mut W,
    key: &str,
    value: &str,
    max_field_len: u32,
) -> Result<usize> {
    let frame = encode_frame(key, value, max_field_len)?;
    writer.write_all(&frame)?;
    Ok(frame.len())
}

fn checked_len(field: &'static str, len: usize, max_field_len: u32) -> Result<u32> {
    match u32::try_from(len) {
        Ok(n) if n <= max_field_len => Ok(n),
        _ => Err(SstError::RecordTooLarge {
            field,
            len,
            max: max_field_len,
        }),
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode the next record from `reader`
///
/// Returns:
/// - `Ok(Some(record))` — a complete record with a valid checksum
/// - `Ok(None)` — clean end of stream (no bytes left at a record boundary)
/// - `Err(Corruption)` — truncated record, oversized length, bad checksum
///   or invalid UTF-8
/// - `Err(Io)` — any other read failure
pub fn decode_record<R: Read>(reader: &mut R, max_field_len: u32) -> Result<Option<Record>> {
    let mut header = [0u8; RECORD_HEADER_SIZE];
    let filled = read_full(reader, &mut header)?;

    if filled == 0 {
        return Ok(None);
    }
    if filled < RECORD_HEADER_SIZE {
        return Err(SstError::Corruption(format!(
            "Truncated record header: expected {} bytes, got {}",
            RECORD_HEADER_SIZE, filled
        )));
    }

    let mut cursor = &header[..];
    let key_len = cursor.get_u32_le();
    let val_len = cursor.get_u32_le();

    if key_len > max_field_len || val_len > max_field_len {
        return Err(SstError::Corruption(format!(
            "Record field length out of range: key {} bytes, value {} bytes (max {})",
            key_len, val_len, max_field_len
        )));
    }

    let body_len = key_len as usize + val_len as usize + RECORD_CRC_SIZE;
    // Buffer grows with the bytes present, not with the length prefix
    let mut body = Vec::new();
    reader.by_ref().take(body_len as u64).read_to_end(&mut body)?;
    if body.len() < body_len {
        return Err(SstError::Corruption(format!(
            "Truncated record body: expected {} bytes, got {}",
            body_len,
            body.len()
        )));
    }

    let payload_len = key_len as usize + val_len as usize;
    let mut crc_bytes = &body[payload_len..];
    let stored_crc = crc_bytes.get_u32_le();

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&header);
    hasher.update(&body[..payload_len]);
    let computed_crc = hasher.finalize();

    if stored_crc != computed_crc {
        return Err(SstError::Corruption(format!(
            "Record checksum mismatch: stored {:#010x}, computed {:#010x}",
            stored_crc, computed_crc
        )));
    }

    body.truncate(payload_len);
    let value_bytes = body.split_off(key_len as usize);

    let key = String::from_utf8(body)
        .map_err(|_| SstError::Corruption("Record key is not valid UTF-8".to_string()))?;
    let value = String::from_utf8(value_bytes)
        .map_err(|_| SstError::Corruption("Record value is not valid UTF-8".to_string()))?;

    Ok(Some(Record { key, value }))
}

/// Read until `buf` is full or the stream ends; returns bytes read
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(SstError::Io(e)),
        }
    }
    Ok(filled)
}
