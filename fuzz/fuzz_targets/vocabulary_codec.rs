// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the front-compressed term dictionary.

#![no_main]

use libfuzzer_sys::fuzz_target;
use indexsearch::binary::{decode_vocabulary, encode_vocabulary};

fuzz_target!(|input: (Vec<String>, Vec<u8>, u8)| {
    let (mut keys, garbage, count) = input;

    // Sorted keys survive the round trip exactly.
    keys.sort();
    keys.dedup();
    let mut encoded = Vec::new();
    encode_vocabulary(&keys, &mut encoded);
    let (decoded, consumed) =
        decode_vocabulary(&encoded, keys.len()).expect("encoded vocabulary decodes");
    assert_eq!(decoded, keys);
    assert_eq!(consumed, encoded.len());

    // Arbitrary bytes never panic, and never claim more than they read.
    if let Ok((terms, consumed)) = decode_vocabulary(&garbage, count as usize) {
        assert_eq!(terms.len(), count as usize);
        assert!(consumed <= garbage.len());
    }
});
