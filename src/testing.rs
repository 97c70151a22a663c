// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test fixtures shared by unit tests, integration tests, benches and fuzz
//! targets.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use std::path::Path;

use crate::analysis::AnalyzerConfig;
use crate::config::SearchConfig;
use crate::error::Result;
use crate::index::{IndexBuilder, MemoryIndex};

/// Field every fixture indexes into.
pub const TEXT_FIELD: &str = "text";

/// The canonical three documents. Doc ids are 0, 1, 2.
pub const THREE_DOCS: [&str; 3] = ["the quick brown fox", "the lazy dog", "quick dogs run"];

/// Index `texts` into the `text` field with the default analyzer.
pub fn text_index<S: AsRef<str>>(texts: &[S]) -> MemoryIndex {
    text_index_with(texts, AnalyzerConfig::default())
}

pub fn text_index_with<S: AsRef<str>>(texts: &[S], analyzer: AnalyzerConfig) -> MemoryIndex {
    let mut builder = IndexBuilder::new(analyzer);
    for text in texts {
        builder
            .add_document([(TEXT_FIELD, text.as_ref())])
            .expect("fixture document fits the index");
    }
    builder.build()
}

pub fn three_doc_index() -> MemoryIndex {
    text_index(&THREE_DOCS)
}

/// Default config searching the `text` field.
pub fn text_config() -> SearchConfig {
    SearchConfig {
        default_field: TEXT_FIELD.to_string(),
        ..SearchConfig::default()
    }
}

/// Write `texts` as an index directory under `dir`.
pub fn write_text_index<S: AsRef<str>>(dir: &Path, texts: &[S]) -> Result<()> {
    text_index(texts).write_to_dir(dir)
}

/// Deterministic pseudo-random corpus over a small vocabulary, so terms
/// repeat across documents. Same seed, same corpus.
pub fn synthetic_corpus(docs: usize, words_per_doc: usize, seed: u64) -> Vec<String> {
    const VOCABULARY: [&str; 24] = [
        "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
        "lambda", "mu", "nu", "xi", "omicron", "pi", "rho", "sigma", "tau", "upsilon", "phi",
        "chi", "psi", "omega",
    ];

    // xorshift64*
    let mut state = seed.max(1);
    let mut next = move || {
        state ^= state >> 12;
        state ^= state << 25;
        state ^= state >> 27;
        state.wrapping_mul(0x2545_F491_4F6C_DD1D)
    };

    (0..docs)
        .map(|_| {
            (0..words_per_doc)
                .map(|_| VOCABULARY[(next() % VOCABULARY.len() as u64) as usize])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
