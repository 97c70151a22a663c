// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the query parser.
//!
//! Query strings come straight from users. Parsing must return a query or a
//! syntax error for any input, and whatever it accepts must evaluate.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use indexsearch::query::Occur;
use indexsearch::testing::three_doc_index;
use indexsearch::{parse_query, search, ParserOptions, SearchError};

#[derive(Debug, Arbitrary)]
struct Input {
    query: String,
    leading_wildcard: bool,
    require_all: bool,
    limit: u8,
}

fuzz_target!(|input: Input| {
    let options = ParserOptions {
        allow_leading_wildcard: input.leading_wildcard,
        default_occur: if input.require_all { Occur::Must } else { Occur::Should },
    };

    let query = match parse_query(&input.query, "text", &options) {
        Ok(query) => query,
        Err(SearchError::Syntax { .. }) | Err(SearchError::InvalidArgument(_)) => return,
        Err(other) => panic!("parser returned {:?} for {:?}", other, input.query),
    };

    let _ = query.to_string();

    let index = three_doc_index();
    let limit = usize::from(input.limit).max(1);
    let result = search(&query, &index, limit).expect("accepted query must evaluate");

    assert!(result.hits.len() <= limit);
    assert!(result.hits.len() as u64 <= result.total_match_count);
    assert!(result.total_match_count <= 3);
    for pair in result.hits.windows(2) {
        assert!(pair[0].score >= pair[1].score, "hits out of order: {:?}", result.hits);
    }
});
