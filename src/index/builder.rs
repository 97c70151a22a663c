// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Builds a [`MemoryIndex`] from documents.
//!
//! Meant for tests, benches and fixtures rather than bulk indexing. Documents
//! are analyzed as they arrive and get consecutive doc ids starting at 0.

use std::collections::BTreeMap;

use super::{DocId, MemoryIndex, Posting, StoredDocument};
use crate::analysis::{Analyzer, AnalyzerConfig};
use crate::binary::{KEY_SEPARATOR, MAX_DOC_COUNT};
use crate::error::{Result, SearchError};

#[derive(Debug, Clone)]
pub struct IndexBuilder {
    analyzer: Analyzer,
    postings: BTreeMap<(String, String), Vec<Posting>>,
    /// Sparse until `build`: a column may be shorter than the doc count.
    field_lengths: BTreeMap<String, Vec<u32>>,
    documents: Vec<StoredDocument>,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl IndexBuilder {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            analyzer: Analyzer::new(config),
            postings: BTreeMap::new(),
            field_lengths: BTreeMap::new(),
            documents: Vec::new(),
        }
    }

    pub fn doc_count(&self) -> u32 {
        self.documents.len() as u32
    }

    /// Analyze, index and store one document. Returns its doc id.
    pub fn add_document<I, K, V>(&mut self, fields: I) -> Result<DocId>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let doc_id = self.doc_count();
        if doc_id >= MAX_DOC_COUNT {
            return Err(SearchError::InvalidArgument(format!(
                "index is full ({} documents)",
                MAX_DOC_COUNT
            )));
        }

        let mut stored = StoredDocument::new();
        for (name, value) in fields {
            let name = name.into();
            if name.is_empty() || name.contains(KEY_SEPARATOR) {
                return Err(SearchError::InvalidArgument(format!(
                    "invalid field name {:?}",
                    name
                )));
            }
            stored.insert(name, value.into());
        }

        for (field, value) in &stored {
            let mut positions: BTreeMap<String, Vec<u32>> = BTreeMap::new();
            let mut length = 0u32;
            for token in self.analyzer.analyze(value) {
                positions.entry(token.text).or_default().push(token.position);
                length += 1;
            }

            let column = self.field_lengths.entry(field.clone()).or_default();
            column.resize(doc_id as usize, 0);
            column.push(length);

            for (term, positions) in positions {
                self.postings
                    .entry((field.clone(), term))
                    .or_default()
                    .push(Posting {
                        doc_id,
                        term_freq: positions.len() as u32,
                        positions,
                    });
            }
        }

        log::trace!("indexed doc {} ({} fields)", doc_id, stored.len());
        self.documents.push(stored);
        Ok(doc_id)
    }

    /// Add every text as a document with a single field.
    pub fn add_texts<S: AsRef<str>>(&mut self, field: &str, texts: &[S]) -> Result<Vec<DocId>> {
        texts
            .iter()
            .map(|text| self.add_document([(field, text.as_ref())]))
            .collect()
    }

    pub fn build(self) -> MemoryIndex {
        let doc_count = self.documents.len();
        let field_lengths = self
            .field_lengths
            .into_iter()
            .map(|(field, mut column)| {
                column.resize(doc_count, 0);
                (field, column)
            })
            .collect();

        MemoryIndex::from_parts(
            self.analyzer.config().clone(),
            self.postings,
            field_lengths,
            self.documents,
        )
    }
}
