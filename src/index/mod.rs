// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Read-only access to an inverted index.
//!
//! `IndexReader` is everything the evaluator is allowed to ask: collection
//! statistics, postings, the sorted term dictionary, field lengths, and stored
//! fields for the final hits. Two implementations:
//!
//! - [`MemoryIndex`]: postings in a `BTreeMap`, produced by [`IndexBuilder`]
//! - [`DiskIndex`]: an index directory (`manifest.json` + `index.isx`)
//!
//! Both are immutable once built and `Send + Sync`, so any number of searches
//! can share one without locking.

mod builder;
mod disk;
mod manifest;
mod memory;

pub use builder::IndexBuilder;
pub use disk::DiskIndex;
pub use manifest::{Manifest, INDEX_FILE_NAME, MANIFEST_FILE_NAME};
pub use memory::MemoryIndex;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalyzerConfig;
use crate::error::Result;

/// Dense document id, assigned in insertion order.
pub type DocId = u32;

/// Doc id of an exhausted cursor. Sorts after every real document.
pub const TERMINATED: DocId = u32::MAX;

/// Stored field values, ordered by field name.
pub type StoredDocument = BTreeMap<String, String>;

/// One document's entry in a term's postings list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub term_freq: u32,
    /// Token positions, ascending. `positions.len() == term_freq`.
    pub positions: Vec<u32>,
}

/// Postings for one term, ascending by doc id, decoded lazily.
pub type Postings<'a> = Box<dyn Iterator<Item = Result<Posting>> + 'a>;

pub trait IndexReader: Send + Sync {
    /// Number of documents, including ones with no indexed terms.
    fn total_document_count(&self) -> u32;

    /// Number of documents containing `term` in `field`. 0 if absent.
    fn document_frequency(&self, field: &str, term: &str) -> Result<u32>;

    /// Postings for `term` in `field`. Empty when either is unknown.
    /// Each call starts from the beginning.
    fn postings<'a>(&'a self, field: &str, term: &str) -> Result<Postings<'a>>;

    /// Terms of `field` starting with `prefix`, sorted. An empty prefix lists
    /// the field's whole dictionary.
    fn terms_with_prefix(&self, field: &str, prefix: &str) -> Result<Vec<String>>;

    /// Number of indexed tokens of `field` in `doc`.
    fn field_length(&self, doc: DocId, field: &str) -> Result<u32>;

    /// Stored field values of `doc`.
    fn fetch_document(&self, doc: DocId) -> Result<StoredDocument>;

    /// Indexed field names, sorted.
    fn fields(&self) -> Vec<String>;

    /// How the indexed text was analyzed. Queries must use the same.
    fn analyzer_config(&self) -> &AnalyzerConfig;
}
