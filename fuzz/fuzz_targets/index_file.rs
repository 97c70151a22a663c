// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for index file validation.
//!
//! The fuzzer supplies everything before the footer and the target appends a
//! correct CRC, so inputs get past the checksum and exercise the header,
//! section and dictionary checks behind it.

#![no_main]

use libfuzzer_sys::fuzz_target;
use indexsearch::binary::{IndexFile, IndexFooter};

fuzz_target!(|data: &[u8]| {
    let mut bytes = data.to_vec();
    let footer = IndexFooter {
        crc32: IndexFooter::compute_crc32(data),
    };
    if footer.write(&mut bytes).is_err() {
        return;
    }

    let Ok(file) = IndexFile::from_bytes(bytes) else {
        return;
    };

    // Whatever validated must be safe to walk end to end.
    let doc_count = file.doc_count();
    for field in file.fields().to_vec() {
        let ord = file.field_ordinal(&field).expect("listed field has an ordinal");
        for term in file.terms_with_prefix(&field, "") {
            let info = file.lookup(&field, &term).expect("listed term resolves");
            let Ok(postings) = file.postings(info) else {
                continue;
            };
            let mut last = None;
            for posting in postings {
                let Ok(posting) = posting else {
                    break;
                };
                assert!(posting.doc_id < doc_count);
                assert!(last.map_or(true, |prev| posting.doc_id > prev));
                assert_eq!(posting.positions.len(), posting.term_freq as usize);
                last = Some(posting.doc_id);
            }
        }
        for doc in 0..doc_count.min(64) {
            let _ = file.field_length(ord, doc);
        }
    }
    for doc in 0..doc_count.min(64) {
        let _ = file.document(doc);
    }
});
