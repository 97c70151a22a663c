// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format header and footer structures.
//!
//! The header is 40 bytes of fixed-size fields, parsed before anything else.
//! It gives every section's length, so every section's offset follows.
//!
//! The footer is 8 bytes: a CRC32 over everything before it, plus a magic
//! number ("XRSI", the header magic reversed). A bad footer means the file
//! was corrupted or truncated and nothing in it should be trusted.
//!
//! `SectionOffsets` is the single source of truth for the file layout. The
//! writer and the reader both go through it.

use std::io::{self, Read, Write};

use crc32fast::Hasher as Crc32Hasher;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "ISRX" in ASCII (header)
pub const MAGIC: [u8; 4] = *b"ISRX";

/// Footer magic: "XRSI" (reversed, marks valid file end)
pub const FOOTER_MAGIC: [u8; 4] = *b"XRSI";

/// Current format version
pub const VERSION: u8 = 1;

// ============================================================================
// SECURITY LIMITS (prevent resource exhaustion from malicious input)
// ============================================================================

/// Maximum file size: 1 GiB
pub const MAX_FILE_SIZE: usize = 1024 * 1024 * 1024;

/// Maximum number of documents
pub const MAX_DOC_COUNT: u32 = 10_000_000;

/// Maximum number of (field, term) pairs
pub const MAX_TERM_COUNT: u32 = 10_000_000;

/// Maximum number of fields
pub const MAX_FIELD_COUNT: u32 = 4096;

/// Maximum posting list size per term
pub const MAX_POSTING_SIZE: usize = 10_000_000;

/// Maximum positions recorded for one term in one document
pub const MAX_TERM_FREQ: u32 = 10_000_000;

/// Maximum varint bytes (u64 needs at most 10 bytes)
pub const MAX_VARINT_BYTES: usize = 10;

// ============================================================================
// FLAGS
// ============================================================================

/// Format flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags(pub(crate) u8);

impl FormatFlags {
    pub const HAS_POSITIONS: u8 = 0b0000_0001;
    pub const HAS_STORED_FIELDS: u8 = 0b0000_0010;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn with_positions(mut self) -> Self {
        self.0 |= Self::HAS_POSITIONS;
        self
    }

    pub fn with_stored_fields(mut self) -> Self {
        self.0 |= Self::HAS_STORED_FIELDS;
        self
    }

    pub fn has_positions(self) -> bool {
        self.0 & Self::HAS_POSITIONS != 0
    }

    pub fn has_stored_fields(self) -> bool {
        self.0 & Self::HAS_STORED_FIELDS != 0
    }
}

// ============================================================================
// HEADER
// ============================================================================

/// Binary format header (40 bytes fixed size)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHeader {
    pub version: u8,
    pub flags: FormatFlags,
    pub doc_count: u32,
    pub field_count: u32,
    pub term_count: u32,
    pub fields_len: u32,
    pub vocab_len: u32,
    pub postings_len: u32,
    pub lengths_len: u32,
    pub docs_len: u32,
}

impl IndexHeader {
    // 4 (magic) + 1 (version) + 1 (flags) + 2 (reserved) + 8*4 (u32s) = 40
    pub const SIZE: usize = 40;

    pub fn section_offsets(&self) -> SectionOffsets {
        SectionOffsets::from_header(self)
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&MAGIC)?;
        w.write_all(&[self.version])?;
        w.write_all(&[self.flags.0])?;
        w.write_all(&[0u8; 2])?; // reserved
        w.write_all(&self.doc_count.to_le_bytes())?;
        w.write_all(&self.field_count.to_le_bytes())?;
        w.write_all(&self.term_count.to_le_bytes())?;
        w.write_all(&self.vocab_len.to_le_bytes())?;
        w.write_all(&self.postings_len.to_le_bytes())?;
        w.write_all(&self.lengths_len.to_le_bytes())?;
        w.write_all(&self.docs_len.to_le_bytes())?;
        w.write_all(&self.fields_len.to_le_bytes())?;
        Ok(())
    }

    pub fn read<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid magic: expected ISRX, got {:?}", magic),
            ));
        }

        let mut buf = [0u8; 36]; // 40 - 4 (magic)
        r.read_exact(&mut buf)?;

        let u32_at = |i: usize| u32::from_le_bytes([buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]);

        Ok(Self {
            version: buf[0],
            flags: FormatFlags(buf[1]),
            // buf[2..4] is reserved
            doc_count: u32_at(4),
            field_count: u32_at(8),
            term_count: u32_at(12),
            vocab_len: u32_at(16),
            postings_len: u32_at(20),
            lengths_len: u32_at(24),
            docs_len: u32_at(28),
            fields_len: u32_at(32),
        })
    }
}

// ============================================================================
// SECTION OFFSETS
// ============================================================================

/// Section byte ranges, `(start, end)` from the start of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionOffsets {
    pub fields: (usize, usize),
    pub vocabulary: (usize, usize),
    pub postings: (usize, usize),
    pub field_lengths: (usize, usize),
    pub docs: (usize, usize),
    pub footer: (usize, usize),
}

impl SectionOffsets {
    /// Layout order:
    /// 1. HEADER        [40B]
    /// 2. FIELDS        [fields_len]
    /// 3. VOCABULARY    [vocab_len]
    /// 4. POSTINGS      [postings_len]
    /// 5. FIELD_LENGTHS [lengths_len]
    /// 6. DOCS          [docs_len]
    /// 7. FOOTER        [8B]
    pub fn from_header(h: &IndexHeader) -> Self {
        let mut pos = IndexHeader::SIZE;
        let mut next = |len: u32| {
            let start = pos;
            pos += len as usize;
            (start, pos)
        };

        let fields = next(h.fields_len);
        let vocabulary = next(h.vocab_len);
        let postings = next(h.postings_len);
        let field_lengths = next(h.lengths_len);
        let docs = next(h.docs_len);
        let footer = next(IndexFooter::SIZE as u32);

        Self {
            fields,
            vocabulary,
            postings,
            field_lengths,
            docs,
            footer,
        }
    }

    /// Expected content size (everything before footer)
    pub fn content_size(&self) -> usize {
        self.footer.0
    }

    /// Total file size including footer
    pub fn total_size(&self) -> usize {
        self.footer.1
    }

    #[inline]
    pub fn slice<'a>(&self, bytes: &'a [u8], section: (usize, usize)) -> Option<&'a [u8]> {
        bytes.get(section.0..section.1)
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFooter {
    /// CRC32 of header + all sections (everything before footer)
    pub crc32: u32,
}

impl IndexFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.crc32.to_le_bytes())?;
        w.write_all(&FOOTER_MAGIC)?;
        Ok(())
    }

    pub fn read(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "File too short for footer",
            ));
        }

        let footer_start = bytes.len() - Self::SIZE;

        let magic = &bytes[footer_start + 4..];
        if magic != FOOTER_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid footer magic: expected XRSI, got {:?}", magic),
            ));
        }

        let crc32 = u32::from_le_bytes([
            bytes[footer_start],
            bytes[footer_start + 1],
            bytes[footer_start + 2],
            bytes[footer_start + 3],
        ]);

        Ok(Self { crc32 })
    }

    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}
