// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for varint (LEB128) encoding/decoding.
//!
//! Every count, offset and position in an index file is a varint.

#![no_main]

use libfuzzer_sys::fuzz_target;
use indexsearch::binary::{decode_varint, encode_varint, MAX_VARINT_BYTES};

fuzz_target!(|data: &[u8]| {
    // Garbage must decode to Err, never panic.
    if let Ok((value, consumed)) = decode_varint(data) {
        assert!(consumed <= MAX_VARINT_BYTES);
        assert!(consumed <= data.len());

        let mut reencoded = Vec::new();
        encode_varint(value, &mut reencoded);
        let (redecoded, reconsumed) =
            decode_varint(&reencoded).expect("re-encoded varint decodes");
        assert_eq!(value, redecoded);
        assert_eq!(reconsumed, reencoded.len());
        // Canonical encodings are never longer than what we read.
        assert!(reencoded.len() <= consumed);
    }
});
