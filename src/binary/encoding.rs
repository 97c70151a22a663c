// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives: varint, string tables, front compression.
//!
//! Varint for integers that are usually small. Length-prefixed strings for
//! the field table. Front compression for the sorted term dictionary, where
//! neighbours share long prefixes ("text\0quick", "text\0quickly").
//!
//! # References
//!
//! - **Varint (LEB128)**: Little-endian base-128 variable-length integer encoding.
//!   See Google Protocol Buffers encoding: <https://protobuf.dev/programming-guides/encoding/>
//!
//! - **Front Compression**: Witten, Moffat, Bell (1999): "Managing Gigabytes",
//!   §3.3 "Front Coding".

use std::io;

use super::header::MAX_VARINT_BYTES;

// ============================================================================
// VARINT ENCODING
// ============================================================================

/// Encode a varint to bytes
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        } else {
            buf.push(byte | 0x80);
        }
    }
}

/// Decode a varint from bytes, returning (value, bytes_consumed)
///
/// Returns an error if:
/// - Buffer is empty
/// - Varint exceeds MAX_VARINT_BYTES (malformed/malicious input)
pub fn decode_varint(bytes: &[u8]) -> io::Result<(u64, usize)> {
    if bytes.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Empty buffer for varint",
        ));
    }

    let mut result: u64 = 0;
    let mut shift = 0;
    let mut i = 0;

    while i < bytes.len() && i < MAX_VARINT_BYTES {
        let byte = bytes[i];
        result |= ((byte & 0x7F) as u64) << shift;
        i += 1;
        if byte & 0x80 == 0 {
            return Ok((result, i));
        }
        shift += 7;
    }

    if i >= MAX_VARINT_BYTES {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Varint exceeds maximum length (possible corruption)",
        ))
    } else {
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Incomplete varint",
        ))
    }
}

/// Decode a varint at `*pos` and advance past it.
#[inline]
pub fn read_varint(bytes: &[u8], pos: &mut usize) -> io::Result<u64> {
    let rest = bytes.get(*pos..).unwrap_or(&[]);
    let (value, consumed) = decode_varint(rest)?;
    *pos += consumed;
    Ok(value)
}

/// Decode a varint that must fit in a u32.
#[inline]
pub fn read_varint_u32(bytes: &[u8], pos: &mut usize) -> io::Result<u32> {
    let value = read_varint(bytes, pos)?;
    u32::try_from(value).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Value {} does not fit in u32", value),
        )
    })
}

/// Read `len` bytes at `*pos` as UTF-8 and advance past them.
pub fn read_str<'a>(bytes: &'a [u8], pos: &mut usize, len: usize, what: &str) -> io::Result<&'a str> {
    let end = pos.checked_add(len).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} length {} causes overflow", what, len),
        )
    })?;
    let raw = bytes.get(*pos..end).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("Truncated {} (expected {} bytes)", what, len),
        )
    })?;
    let text = std::str::from_utf8(raw).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Invalid UTF-8 in {}: {}", what, e),
        )
    })?;
    *pos = end;
    Ok(text)
}

// ============================================================================
// STRING TABLE ENCODING
// ============================================================================

/// Encode a string table (count, then length-prefixed strings)
pub fn encode_string_table(strings: &[String], buf: &mut Vec<u8>) {
    encode_varint(strings.len() as u64, buf);
    for s in strings {
        let bytes = s.as_bytes();
        encode_varint(bytes.len() as u64, buf);
        buf.extend_from_slice(bytes);
    }
}

/// Decode a string table
pub fn decode_string_table(bytes: &[u8]) -> io::Result<(Vec<String>, usize)> {
    let mut pos = 0;
    let count = read_varint(bytes, &mut pos)? as usize;

    // Each entry needs at least one byte for its length varint
    let remaining_bytes = bytes.len().saturating_sub(pos);
    if count > remaining_bytes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "String table count {} exceeds available bytes {}",
                count, remaining_bytes
            ),
        ));
    }

    let mut table = Vec::with_capacity(count);
    for i in 0..count {
        let len = read_varint(bytes, &mut pos)? as usize;
        let s = read_str(bytes, &mut pos, len, &format!("string table entry {}", i))?;
        table.push(s.to_string());
    }

    Ok((table, pos))
}

// ============================================================================
// VOCABULARY ENCODING (front compression)
// ============================================================================

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// Encode sorted keys with front compression.
///
/// Format: [shared_prefix_len: varint][suffix_len: varint][suffix: bytes]
///
/// Example:
/// - "text\0quick" -> [0][10]["text\0quick"]
/// - "text\0quickly" -> [10][2]["ly"]
/// - "text\0quiet" -> [8][2]["et"]
pub fn encode_vocabulary<S: AsRef<str>>(vocabulary: &[S], out: &mut Vec<u8>) {
    let mut prev: &[u8] = &[];

    for term in vocabulary {
        let bytes = term.as_ref().as_bytes();
        let shared = common_prefix_len(prev, bytes);
        let suffix = &bytes[shared..];

        encode_varint(shared as u64, out);
        encode_varint(suffix.len() as u64, out);
        out.extend_from_slice(suffix);

        prev = bytes;
    }
}

/// Decode front-compressed keys, returning (keys, bytes_consumed).
pub fn decode_vocabulary(bytes: &[u8], term_count: usize) -> io::Result<(Vec<String>, usize)> {
    // Each term needs at least two bytes (shared and suffix length)
    if term_count > bytes.len() / 2 + 1 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Term count {} exceeds vocabulary size {}", term_count, bytes.len()),
        ));
    }

    let mut terms = Vec::with_capacity(term_count);
    let mut pos = 0;
    let mut prev_bytes: Vec<u8> = Vec::new();

    for i in 0..term_count {
        if pos >= bytes.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Truncated vocabulary at term {}", i),
            ));
        }

        let shared = read_varint(bytes, &mut pos)? as usize;
        if shared > prev_bytes.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid shared prefix length {} (prev term len {})",
                    shared,
                    prev_bytes.len()
                ),
            ));
        }

        let suffix_len = read_varint(bytes, &mut pos)? as usize;
        let end_pos = pos.checked_add(suffix_len).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Term {} suffix length {} causes overflow", i, suffix_len),
            )
        })?;
        let suffix = bytes.get(pos..end_pos).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Truncated term {} suffix (expected {} bytes)", i, suffix_len),
            )
        })?;

        prev_bytes.truncate(shared);
        prev_bytes.extend_from_slice(suffix);
        pos = end_pos;

        let term = std::str::from_utf8(&prev_bytes).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid UTF-8 in term {}: {}", i, e),
            )
        })?;
        if terms.last().is_some_and(|last: &String| last.as_str() >= term) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Vocabulary not sorted at term {}", i),
            ));
        }
        terms.push(term.to_string());
    }

    Ok((terms, pos))
}
