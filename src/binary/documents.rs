// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-document sections: field lengths and stored fields.
//!
//! FIELD_LENGTHS is a dense `field_count × doc_count` grid of u32 LE, field
//! major. Fixed width so a lookup is one multiply.
//!
//! DOCS starts with `doc_count` u32 LE offsets (relative to the end of the
//! offset table), followed by one record per document. A record is never
//! empty, so every offset points strictly inside the record area.
//!
//! ```text
//! entry_count: varint
//! per entry: field ordinal varint, value length varint, UTF-8 bytes
//! ```
//!
//! Records are only decoded when a hit is materialized.

use std::io;

use super::encoding::{encode_varint, read_str, read_varint, read_varint_u32};
use crate::index::StoredDocument;

// ============================================================================
// FIELD LENGTHS
// ============================================================================

/// Encode one length column per field. Every column has `doc_count` entries.
pub fn encode_field_lengths(columns: &[&[u32]], buf: &mut Vec<u8>) {
    for column in columns {
        for &len in column.iter() {
            buf.extend_from_slice(&len.to_le_bytes());
        }
    }
}

/// Read the length of `field_ord` in `doc` from the FIELD_LENGTHS section.
pub fn read_field_length(section: &[u8], doc_count: u32, field_ord: usize, doc: u32) -> io::Result<u32> {
    let index = field_ord
        .checked_mul(doc_count as usize)
        .and_then(|i| i.checked_add(doc as usize))
        .and_then(|i| i.checked_mul(4))
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "Field length index overflows"))?;
    let raw = section.get(index..index.saturating_add(4)).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("Field length for field {} doc {} out of bounds", field_ord, doc),
        )
    })?;
    Ok(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

// ============================================================================
// STORED FIELDS
// ============================================================================

/// Encode stored documents against the field table.
pub fn encode_documents(docs: &[StoredDocument], fields: &[String], buf: &mut Vec<u8>) -> io::Result<()> {
    let mut records = Vec::new();
    let mut offsets = Vec::with_capacity(docs.len());

    for doc in docs {
        offsets.push(u32::try_from(records.len()).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "Stored fields exceed 4 GiB")
        })?);
        encode_varint(doc.len() as u64, &mut records);
        for (name, value) in doc {
            let ordinal = fields.binary_search(name).map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Stored field '{}' missing from field table", name),
                )
            })?;
            encode_varint(ordinal as u64, &mut records);
            encode_varint(value.len() as u64, &mut records);
            records.extend_from_slice(value.as_bytes());
        }
    }

    for offset in offsets {
        buf.extend_from_slice(&offset.to_le_bytes());
    }
    buf.extend_from_slice(&records);
    Ok(())
}

/// Validated view over the DOCS section.
#[derive(Debug, Clone)]
pub struct DocsTable {
    offsets: Vec<u32>,
    records_start: usize,
}

impl DocsTable {
    pub fn parse(section: &[u8], doc_count: u32) -> io::Result<Self> {
        let table_len = (doc_count as usize).checked_mul(4).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "Docs offset table overflows")
        })?;
        let table = section.get(..table_len).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Docs section too short for {} offsets", doc_count),
            )
        })?;
        let records_len = section.len() - table_len;

        let mut offsets = Vec::with_capacity(doc_count as usize);
        for chunk in table.chunks_exact(4) {
            let offset = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            if offset as usize >= records_len {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Doc offset {} out of bounds ({} bytes)", offset, records_len),
                ));
            }
            if offsets.last().is_some_and(|&prev| prev > offset) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "Doc offsets are not ascending",
                ));
            }
            offsets.push(offset);
        }

        Ok(Self {
            offsets,
            records_start: table_len,
        })
    }

    /// Decode one document's stored fields.
    pub fn document(&self, section: &[u8], doc: u32, fields: &[String]) -> io::Result<StoredDocument> {
        let offset = *self.offsets.get(doc as usize).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Doc id {} out of range", doc),
            )
        })?;
        let records = section.get(self.records_start..).unwrap_or(&[]);
        let mut pos = offset as usize;

        let count = read_varint(records, &mut pos)? as usize;
        if count > fields.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Doc {} has {} stored fields (only {} exist)", doc, count, fields.len()),
            ));
        }

        let mut stored = StoredDocument::new();
        for _ in 0..count {
            let ordinal = read_varint_u32(records, &mut pos)? as usize;
            let name = fields.get(ordinal).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Doc {} references unknown field {}", doc, ordinal),
                )
            })?;
            let len = read_varint(records, &mut pos)? as usize;
            let value = read_str(records, &mut pos, len, "stored value")?;
            stored.insert(name.clone(), value.to_string());
        }
        Ok(stored)
    }
}
