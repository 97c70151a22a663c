// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format for indexsearch index files (`index.isx`).
//!
//! One file, read once at open, never modified. Opening validates everything
//! that can be validated cheaply (CRC, header limits, section bounds, the
//! term dictionary). Postings and stored fields stay encoded and are decoded
//! on demand, so a query only pays for the lists it touches.
//!
//! # Security Considerations
//!
//! Index files may come from anywhere:
//! - All size fields are validated against MAX_* constants
//! - Bounds checking prevents buffer overreads
//! - CRC32 footer detects corruption/truncation
//! - Varint decoder has maximum iteration limits
//!
//! # Format Overview
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (40 bytes)                                          │
//! │   magic: [u8; 4] = "ISRX"                                  │
//! │   version: u8 = 1, flags: u8, reserved: [u8; 2]            │
//! │   doc_count, field_count, term_count: u32                  │
//! │   vocab_len, postings_len, lengths_len, docs_len: u32      │
//! │   fields_len: u32                                          │
//! ├────────────────────────────────────────────────────────────┤
//! │ FIELDS (varint count + length-prefixed names, sorted)      │
//! ├────────────────────────────────────────────────────────────┤
//! │ VOCABULARY                                                 │
//! │   front-compressed "field\0term" keys, sorted              │
//! │   then per key: doc_freq, postings offset, postings length │
//! ├────────────────────────────────────────────────────────────┤
//! │ POSTINGS (delta+varint, positions included)                │
//! ├────────────────────────────────────────────────────────────┤
//! │ FIELD_LENGTHS (field_count × doc_count u32 LE)             │
//! ├────────────────────────────────────────────────────────────┤
//! │ DOCS (offset table + stored field records)                 │
//! ├────────────────────────────────────────────────────────────┤
//! │ FOOTER (8 bytes)                                           │
//! │   crc32: u32 (of everything above)                         │
//! │   magic: [u8; 4] = "XRSI"                                  │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod documents;
mod encoding;
mod header;
mod postings;

pub use documents::{encode_documents, encode_field_lengths, read_field_length, DocsTable};
pub use encoding::{
    decode_string_table, decode_varint, decode_vocabulary, encode_string_table, encode_varint,
    encode_vocabulary,
};
pub use header::{
    FormatFlags, IndexFooter, IndexHeader, SectionOffsets, FOOTER_MAGIC, MAGIC, MAX_DOC_COUNT,
    MAX_FIELD_COUNT, MAX_FILE_SIZE, MAX_POSTING_SIZE, MAX_TERM_COUNT, MAX_TERM_FREQ,
    MAX_VARINT_BYTES, VERSION,
};
pub use postings::{encode_postings, PostingsDecoder};

use std::io;

use encoding::read_varint_u32;

use crate::index::{Posting, StoredDocument};

/// Separates field and term in vocabulary keys. Sorts before every other byte,
/// so each field's terms are contiguous.
pub const KEY_SEPARATOR: char = '\0';

/// Vocabulary key for a (field, term) pair.
pub fn term_key(field: &str, term: &str) -> String {
    let mut key = String::with_capacity(field.len() + term.len() + 1);
    key.push_str(field);
    key.push(KEY_SEPARATOR);
    key.push_str(term);
    key
}

/// Where a term's postings live inside the POSTINGS section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermInfo {
    pub doc_freq: u32,
    pub offset: u32,
    pub len: u32,
}

fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

// ============================================================================
// WRITING
// ============================================================================

/// Everything the writer needs, borrowed from an in-memory index.
#[derive(Debug)]
pub struct IndexSections<'a> {
    pub doc_count: u32,
    /// Sorted, unique field names
    pub fields: &'a [String],
    /// `(term_key, postings)` sorted by key
    pub terms: Vec<(String, &'a [Posting])>,
    /// One column per field, `doc_count` entries each
    pub field_lengths: Vec<&'a [u32]>,
    /// One entry per document
    pub documents: &'a [StoredDocument],
}

fn section_len(bytes: &[u8], name: &str) -> io::Result<u32> {
    u32::try_from(bytes.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, format!("{} section exceeds 4 GiB", name)))
}

/// Serialize an index. The output ends with the CRC footer.
pub fn encode_index(sections: &IndexSections<'_>) -> io::Result<Vec<u8>> {
    let bad_input = |msg: String| io::Error::new(io::ErrorKind::InvalidInput, msg);

    if sections.doc_count > MAX_DOC_COUNT {
        return Err(bad_input(format!("Too many documents: {}", sections.doc_count)));
    }
    if sections.fields.windows(2).any(|w| w[0] >= w[1]) {
        return Err(bad_input("Fields must be sorted and unique".into()));
    }
    if sections.terms.windows(2).any(|w| w[0].0 >= w[1].0) {
        return Err(bad_input("Terms must be sorted and unique".into()));
    }
    if sections.field_lengths.len() != sections.fields.len()
        || sections
            .field_lengths
            .iter()
            .any(|c| c.len() != sections.doc_count as usize)
    {
        return Err(bad_input("Field length columns do not match fields × docs".into()));
    }
    if sections.documents.len() != sections.doc_count as usize {
        return Err(bad_input("Stored documents do not match doc count".into()));
    }

    let mut fields_bytes = Vec::new();
    encode_string_table(sections.fields, &mut fields_bytes);

    let mut postings_bytes = Vec::new();
    let mut infos = Vec::with_capacity(sections.terms.len());
    for (_, postings) in &sections.terms {
        let offset = section_len(&postings_bytes, "Postings")?;
        encode_postings(postings, &mut postings_bytes);
        let end = section_len(&postings_bytes, "Postings")?;
        infos.push(TermInfo {
            doc_freq: postings.len() as u32,
            offset,
            len: end - offset,
        });
    }

    let mut vocab_bytes = Vec::new();
    let keys: Vec<&str> = sections.terms.iter().map(|(k, _)| k.as_str()).collect();
    encode_vocabulary(&keys, &mut vocab_bytes);
    for info in &infos {
        encode_varint(u64::from(info.doc_freq), &mut vocab_bytes);
        encode_varint(u64::from(info.offset), &mut vocab_bytes);
        encode_varint(u64::from(info.len), &mut vocab_bytes);
    }

    let mut lengths_bytes = Vec::new();
    encode_field_lengths(&sections.field_lengths, &mut lengths_bytes);

    let mut docs_bytes = Vec::new();
    encode_documents(sections.documents, sections.fields, &mut docs_bytes)?;

    let header = IndexHeader {
        version: VERSION,
        flags: FormatFlags::new().with_positions().with_stored_fields(),
        doc_count: sections.doc_count,
        field_count: sections.fields.len() as u32,
        term_count: infos.len() as u32,
        fields_len: section_len(&fields_bytes, "Fields")?,
        vocab_len: section_len(&vocab_bytes, "Vocabulary")?,
        postings_len: section_len(&postings_bytes, "Postings")?,
        lengths_len: section_len(&lengths_bytes, "Field lengths")?,
        docs_len: section_len(&docs_bytes, "Docs")?,
    };

    let total_size = header.section_offsets().total_size();
    let mut buf = Vec::with_capacity(total_size);
    header.write(&mut buf)?;
    buf.extend_from_slice(&fields_bytes);
    buf.extend_from_slice(&vocab_bytes);
    buf.extend_from_slice(&postings_bytes);
    buf.extend_from_slice(&lengths_bytes);
    buf.extend_from_slice(&docs_bytes);

    let crc32 = IndexFooter::compute_crc32(&buf);
    IndexFooter { crc32 }.write(&mut buf)?;

    Ok(buf)
}

// ============================================================================
// READING
// ============================================================================

/// A validated index file. Owns its bytes; postings and stored fields are
/// decoded lazily from them.
#[derive(Debug)]
pub struct IndexFile {
    bytes: Vec<u8>,
    header: IndexHeader,
    offsets: SectionOffsets,
    fields: Vec<String>,
    keys: Vec<String>,
    terms: Vec<TermInfo>,
    docs: DocsTable,
}

impl IndexFile {
    /// Validate and index the file contents.
    ///
    /// # Validation
    ///
    /// 1. File size is within limits (MAX_FILE_SIZE)
    /// 2. Footer magic and CRC32 checksum
    /// 3. Header magic, version, flags and counts
    /// 4. Section lengths add up to the file size
    /// 5. Field table, vocabulary and doc offset table decode cleanly
    /// 6. Every vocabulary entry points inside the POSTINGS section
    pub fn from_bytes(bytes: Vec<u8>) -> io::Result<Self> {
        if bytes.len() > MAX_FILE_SIZE {
            return Err(invalid(format!(
                "File too large: {} bytes (max {})",
                bytes.len(),
                MAX_FILE_SIZE
            )));
        }

        let min_size = IndexHeader::SIZE + IndexFooter::SIZE;
        if bytes.len() < min_size {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("File too small: {} bytes (minimum {})", bytes.len(), min_size),
            ));
        }

        let footer = IndexFooter::read(&bytes)?;
        let content = &bytes[..bytes.len() - IndexFooter::SIZE];
        let computed_crc32 = IndexFooter::compute_crc32(content);
        if footer.crc32 != computed_crc32 {
            return Err(invalid(format!(
                "CRC32 mismatch: expected {:#010x}, got {:#010x} (file corrupted)",
                footer.crc32, computed_crc32
            )));
        }

        let header = IndexHeader::read(&mut &bytes[..])?;
        if header.version != VERSION {
            return Err(invalid(format!(
                "Unsupported version: {} (expected {})",
                header.version, VERSION
            )));
        }
        if !header.flags.has_positions() || !header.flags.has_stored_fields() {
            return Err(invalid("Index lacks positions or stored fields"));
        }
        if header.doc_count > MAX_DOC_COUNT {
            return Err(invalid(format!(
                "Too many documents: {} (max {})",
                header.doc_count, MAX_DOC_COUNT
            )));
        }
        if header.term_count > MAX_TERM_COUNT {
            return Err(invalid(format!(
                "Too many terms: {} (max {})",
                header.term_count, MAX_TERM_COUNT
            )));
        }
        if header.field_count > MAX_FIELD_COUNT {
            return Err(invalid(format!(
                "Too many fields: {} (max {})",
                header.field_count, MAX_FIELD_COUNT
            )));
        }

        let offsets = header.section_offsets();
        if offsets.content_size() != content.len() {
            return Err(invalid(format!(
                "Section lengths mismatch: header claims {} bytes, got {} bytes",
                offsets.content_size(),
                content.len()
            )));
        }

        let section = |range: (usize, usize), name: &str| -> io::Result<&[u8]> {
            offsets.slice(&bytes, range).ok_or_else(|| {
                io::Error::new(io::ErrorKind::UnexpectedEof, format!("{} section truncated", name))
            })
        };

        // FIELDS
        let (fields, _) = decode_string_table(section(offsets.fields, "Fields")?)?;
        if fields.len() != header.field_count as usize {
            return Err(invalid(format!(
                "Field count mismatch: header says {}, table has {}",
                header.field_count,
                fields.len()
            )));
        }
        if fields.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid("Field table not sorted"));
        }

        // VOCABULARY
        let vocab = section(offsets.vocabulary, "Vocabulary")?;
        let (keys, mut pos) = decode_vocabulary(vocab, header.term_count as usize)?;
        let postings_len = header.postings_len as u64;
        let mut terms = Vec::with_capacity(keys.len());
        for key in &keys {
            let field = key
                .split_once(KEY_SEPARATOR)
                .map(|(f, _)| f)
                .ok_or_else(|| invalid(format!("Vocabulary key {:?} has no field", key)))?;
            if fields.binary_search_by(|f| f.as_str().cmp(field)).is_err() {
                return Err(invalid(format!("Vocabulary references unknown field '{}'", field)));
            }
            let info = TermInfo {
                doc_freq: read_varint_u32(vocab, &mut pos)?,
                offset: read_varint_u32(vocab, &mut pos)?,
                len: read_varint_u32(vocab, &mut pos)?,
            };
            if info.doc_freq == 0 || info.doc_freq > header.doc_count {
                return Err(invalid(format!("Term {:?} has doc_freq {}", key, info.doc_freq)));
            }
            if u64::from(info.offset) + u64::from(info.len) > postings_len {
                return Err(invalid(format!("Postings for {:?} out of bounds", key)));
            }
            terms.push(info);
        }
        if pos != vocab.len() {
            return Err(invalid(format!(
                "Vocabulary has {} trailing bytes",
                vocab.len() - pos
            )));
        }

        // FIELD_LENGTHS
        let expected_lengths = u64::from(header.field_count) * u64::from(header.doc_count) * 4;
        if u64::from(header.lengths_len) != expected_lengths {
            return Err(invalid(format!(
                "Field lengths section is {} bytes, expected {}",
                header.lengths_len, expected_lengths
            )));
        }

        // DOCS
        let docs = DocsTable::parse(section(offsets.docs, "Docs")?, header.doc_count)?;

        Ok(Self {
            bytes,
            header,
            offsets,
            fields,
            keys,
            terms,
            docs,
        })
    }

    pub fn header(&self) -> &IndexHeader {
        &self.header
    }

    pub fn doc_count(&self) -> u32 {
        self.header.doc_count
    }

    /// Sorted field names
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Size of the file in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn field_ordinal(&self, field: &str) -> Option<usize> {
        self.fields.binary_search_by(|f| f.as_str().cmp(field)).ok()
    }

    pub fn lookup(&self, field: &str, term: &str) -> Option<TermInfo> {
        let key = term_key(field, term);
        self.keys
            .binary_search_by(|k| k.as_str().cmp(key.as_str()))
            .ok()
            .map(|ord| self.terms[ord])
    }

    /// Lazy decoder over one term's postings.
    pub fn postings(&self, info: TermInfo) -> io::Result<PostingsDecoder<'_>> {
        let section = self.section(self.offsets.postings)?;
        let start = info.offset as usize;
        let bytes = section
            .get(start..start + info.len as usize)
            .ok_or_else(|| invalid("Postings range out of bounds"))?;
        let decoder = PostingsDecoder::new(bytes, self.header.doc_count)?;
        if decoder.remaining() != info.doc_freq as usize {
            return Err(invalid(format!(
                "Postings doc_freq {} disagrees with vocabulary {}",
                decoder.remaining(),
                info.doc_freq
            )));
        }
        Ok(decoder)
    }

    /// Terms of `field` starting with `prefix`, in dictionary order.
    pub fn terms_with_prefix(&self, field: &str, prefix: &str) -> Vec<String> {
        let start_key = term_key(field, prefix);
        let field_len = field.len() + KEY_SEPARATOR.len_utf8();
        let start = self.keys.partition_point(|k| k.as_str() < start_key.as_str());
        self.keys[start..]
            .iter()
            .take_while(|k| k.starts_with(start_key.as_str()))
            .map(|k| k[field_len..].to_string())
            .collect()
    }

    pub fn field_length(&self, field_ord: usize, doc: u32) -> io::Result<u32> {
        if doc >= self.header.doc_count {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Doc id {} out of range", doc),
            ));
        }
        let section = self.section(self.offsets.field_lengths)?;
        read_field_length(section, self.header.doc_count, field_ord, doc)
    }

    pub fn document(&self, doc: u32) -> io::Result<StoredDocument> {
        let section = self.section(self.offsets.docs)?;
        self.docs.document(section, doc, &self.fields)
    }

    fn section(&self, range: (usize, usize)) -> io::Result<&[u8]> {
        self.offsets
            .slice(&self.bytes, range)
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "Section truncated"))
    }
}

// ============================================================================
// TESTS
// ============================================================================
