// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk archive format: a zstd-compressed, length-prefixed multi-file
//! container. Entry 0 is always the agent's own entry point.

use crate::error::BuilderError;

/// One file bundled into the archive.
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

const ZSTD_LEVEL: i32 = 3;

/// Pack entries into the uncompressed container layout, then zstd-compress.
pub fn pack(entries: &[ArchiveEntry]) -> Result<Vec<u8>, BuilderError> {
    let mut body = Vec::new();
    body.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    for entry in entries {
        let name_bytes = entry.name.as_bytes();
        body.extend_from_slice(&(name_bytes.len() as u32).to_le_bytes());
        body.extend_from_slice(name_bytes);
        body.extend_from_slice(&(entry.bytes.len() as u64).to_le_bytes());
        body.extend_from_slice(&entry.bytes);
    }
    zstd::stream::encode_all(&body[..], ZSTD_LEVEL).map_err(BuilderError::Io)
}

/// Reverse of [`pack`]. Used by tests and by the reference agent binary when
/// it needs to introspect its own archive.
pub fn unpack(compressed: &[u8]) -> Result<Vec<ArchiveEntry>, BuilderError> {
    let body = zstd::stream::decode_all(compressed).map_err(BuilderError::Io)?;
    let mut cursor = 0usize;
    let read_u32 = |buf: &[u8], at: usize| -> Result<u32, BuilderError> {
        let slice = buf
            .get(at..at + 4)
            .ok_or_else(|| BuilderError::CorruptArchive("truncated u32".to_string()))?;
        Ok(u32::from_le_bytes(slice.try_into().expect("slice is exactly 4 bytes")))
    };
    let read_u64 = |buf: &[u8], at: usize| -> Result<u64, BuilderError> {
        let slice = buf
            .get(at..at + 8)
            .ok_or_else(|| BuilderError::CorruptArchive("truncated u64".to_string()))?;
        Ok(u64::from_le_bytes(slice.try_into().expect("slice is exactly 8 bytes")))
    };

    let count = read_u32(&body, cursor)? as usize;
    cursor += 4;

    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        let name_len = read_u32(&body, cursor)? as usize;
        cursor += 4;
        let name = body
            .get(cursor..cursor + name_len)
            .ok_or_else(|| BuilderError::CorruptArchive("truncated entry name".to_string()))?;
        let name = String::from_utf8(name.to_vec())
            .map_err(|_| BuilderError::CorruptArchive("entry name is not UTF-8".to_string()))?;
        cursor += name_len;

        let content_len = read_u64(&body, cursor)? as usize;
        cursor += 8;
        let bytes = body
            .get(cursor..cursor + content_len)
            .ok_or_else(|| BuilderError::CorruptArchive("truncated entry body".to_string()))?
            .to_vec();
        cursor += content_len;

        entries.push(ArchiveEntry { name, bytes });
    }
    Ok(entries)
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
