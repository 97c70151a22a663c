// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Postings list encoding and lazy decoding.
//!
//! For each term, which documents contain it and where. Doc ids are delta
//! encoded since they only ever go up: documents 100, 102, 105 become
//! [100, 2, 3]. Positions inside a document are delta encoded the same way.
//!
//! Format, per term:
//!
//! ```text
//! doc_freq: varint
//! per document (ascending doc id):
//!   doc_delta: varint      (from previous doc id, first from 0)
//!   term_freq: varint      (≥ 1)
//!   position deltas: varint × term_freq
//! ```
//!
//! Decoding is an iterator. Nothing is materialized beyond the posting being
//! returned, so a conjunction that stops early never touches the tail.
//!
//! # References
//!
//! - **Delta Encoding for Postings**: Zobel & Moffat (2006): "Inverted Files
//!   for Text Search Engines", ACM Computing Surveys.

use std::io;

use super::encoding::{encode_varint, read_varint, read_varint_u32};
use super::header::{MAX_POSTING_SIZE, MAX_TERM_FREQ};
use crate::index::Posting;

// ============================================================================
// ENCODING
// ============================================================================

/// Encode a posting list. Entries must be sorted by doc id with ascending positions.
pub fn encode_postings(entries: &[Posting], buf: &mut Vec<u8>) {
    encode_varint(entries.len() as u64, buf);

    let mut prev_doc_id = 0u32;
    for entry in entries {
        encode_varint(u64::from(entry.doc_id - prev_doc_id), buf);
        prev_doc_id = entry.doc_id;

        encode_varint(entry.positions.len() as u64, buf);
        let mut prev_pos = 0u32;
        for &pos in &entry.positions {
            encode_varint(u64::from(pos - prev_pos), buf);
            prev_pos = pos;
        }
    }
}

// ============================================================================
// DECODING
// ============================================================================

/// Lazy decoder over one encoded posting list.
///
/// Yields `Err` once on corrupt input and then stops.
#[derive(Debug, Clone)]
pub struct PostingsDecoder<'a> {
    bytes: &'a [u8],
    pos: usize,
    remaining: usize,
    prev_doc_id: Option<u32>,
    doc_count: u32,
    failed: bool,
}

impl<'a> PostingsDecoder<'a> {
    /// Start decoding. `doc_count` bounds every decoded doc id.
    pub fn new(bytes: &'a [u8], doc_count: u32) -> io::Result<Self> {
        let mut pos = 0;
        let doc_freq = read_varint(bytes, &mut pos)? as usize;

        if doc_freq > MAX_POSTING_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Posting list too large: {} (max {})", doc_freq, MAX_POSTING_SIZE),
            ));
        }
        if doc_freq > doc_count as usize {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Posting list of {} entries exceeds doc count {}", doc_freq, doc_count),
            ));
        }

        Ok(Self {
            bytes,
            pos,
            remaining: doc_freq,
            prev_doc_id: None,
            doc_count,
            failed: false,
        })
    }

    /// Number of postings not yet decoded
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    fn decode_one(&mut self) -> io::Result<Posting> {
        let delta = read_varint_u32(self.bytes, &mut self.pos)?;
        let doc_id = match self.prev_doc_id {
            None => delta,
            Some(_) if delta == 0 => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "Posting doc ids are not strictly ascending",
                ));
            }
            Some(prev) => prev.checked_add(delta).ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidData, "Posting doc id overflows")
            })?,
        };
        if doc_id >= self.doc_count {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Posting doc id {} out of range (doc count {})", doc_id, self.doc_count),
            ));
        }
        self.prev_doc_id = Some(doc_id);

        let term_freq = read_varint_u32(self.bytes, &mut self.pos)?;
        if term_freq == 0 || term_freq > MAX_TERM_FREQ {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid term frequency {} in doc {}", term_freq, doc_id),
            ));
        }
        // Every position takes at least one byte
        if term_freq as usize > self.bytes.len().saturating_sub(self.pos) {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Truncated positions for doc {}", doc_id),
            ));
        }

        let mut positions = Vec::with_capacity(term_freq as usize);
        let mut prev_pos = 0u32;
        for i in 0..term_freq {
            let delta = read_varint_u32(self.bytes, &mut self.pos)?;
            if i > 0 && delta == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Positions not strictly ascending in doc {}", doc_id),
                ));
            }
            prev_pos = prev_pos.checked_add(delta).ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidData, "Position overflows")
            })?;
            positions.push(prev_pos);
        }

        Ok(Posting {
            doc_id,
            term_freq,
            positions,
        })
    }
}

impl Iterator for PostingsDecoder<'_> {
    type Item = io::Result<Posting>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let result = self.decode_one();
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
