// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::manifest::{Manifest, INDEX_FILE_NAME};
use super::{DocId, IndexReader, Posting, Postings, StoredDocument};
use crate::analysis::AnalyzerConfig;
use crate::binary::{encode_index, term_key, IndexSections};
use crate::error::{Result, SearchError};

/// Fully materialized index.
#[derive(Debug, Clone)]
pub struct MemoryIndex {
    analyzer: AnalyzerConfig,
    postings: BTreeMap<(String, String), Vec<Posting>>,
    /// Dense: one entry per document
    field_lengths: BTreeMap<String, Vec<u32>>,
    documents: Vec<StoredDocument>,
}

impl MemoryIndex {
    pub(crate) fn from_parts(
        analyzer: AnalyzerConfig,
        postings: BTreeMap<(String, String), Vec<Posting>>,
        field_lengths: BTreeMap<String, Vec<u32>>,
        documents: Vec<StoredDocument>,
    ) -> Self {
        Self {
            analyzer,
            postings,
            field_lengths,
            documents,
        }
    }

    /// Number of distinct (field, term) pairs
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Serialize to the `index.isx` format.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let fields: Vec<String> = self.field_lengths.keys().cloned().collect();
        let sections = IndexSections {
            doc_count: self.documents.len() as u32,
            fields: &fields,
            terms: self
                .postings
                .iter()
                .map(|((field, term), postings)| (term_key(field, term), postings.as_slice()))
                .collect(),
            field_lengths: self.field_lengths.values().map(Vec::as_slice).collect(),
            documents: &self.documents,
        };
        encode_index(&sections).map_err(|e| SearchError::InvalidArgument(e.to_string()))
    }

    /// Write `manifest.json` and `index.isx` into `dir`, creating it if needed.
    pub fn write_to_dir(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        let bytes = self.to_bytes()?;
        fs::write(dir.join(INDEX_FILE_NAME), &bytes)?;
        Manifest::new(
            self.documents.len() as u32,
            self.fields(),
            self.analyzer.clone(),
        )
        .save(dir)?;
        log::info!(
            "wrote index to {} ({} documents, {} terms, {} bytes)",
            dir.display(),
            self.documents.len(),
            self.postings.len(),
            bytes.len()
        );
        Ok(())
    }

    fn check_doc(&self, doc: DocId) -> Result<()> {
        if (doc as usize) < self.documents.len() {
            Ok(())
        } else {
            Err(SearchError::InvalidArgument(format!(
                "doc id {} out of range (doc count {})",
                doc,
                self.documents.len()
            )))
        }
    }

    fn list(&self, field: &str, term: &str) -> Option<&Vec<Posting>> {
        self.postings.get(&(field.to_string(), term.to_string()))
    }
}

impl IndexReader for MemoryIndex {
    fn total_document_count(&self) -> u32 {
        self.documents.len() as u32
    }

    fn document_frequency(&self, field: &str, term: &str) -> Result<u32> {
        Ok(self.list(field, term).map_or(0, |l| l.len() as u32))
    }

    fn postings<'a>(&'a self, field: &str, term: &str) -> Result<Postings<'a>> {
        match self.list(field, term) {
            Some(list) => Ok(Box::new(list.iter().cloned().map(Ok))),
            None => Ok(Box::new(std::iter::empty())),
        }
    }

    fn terms_with_prefix(&self, field: &str, prefix: &str) -> Result<Vec<String>> {
        let start = (field.to_string(), prefix.to_string());
        Ok(self
            .postings
            .range(start..)
            .map(|((f, t), _)| (f, t))
            .take_while(|(f, t)| f.as_str() == field && t.starts_with(prefix))
            .map(|(_, t)| t.clone())
            .collect())
    }

    fn field_length(&self, doc: DocId, field: &str) -> Result<u32> {
        self.check_doc(doc)?;
        Ok(self
            .field_lengths
            .get(field)
            .and_then(|column| column.get(doc as usize))
            .copied()
            .unwrap_or(0))
    }

    fn fetch_document(&self, doc: DocId) -> Result<StoredDocument> {
        self.check_doc(doc)?;
        Ok(self.documents[doc as usize].clone())
    }

    fn fields(&self) -> Vec<String> {
        self.field_lengths.keys().cloned().collect()
    }

    fn analyzer_config(&self) -> &AnalyzerConfig {
        &self.analyzer
    }
}
