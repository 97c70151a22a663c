// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use crate::error::Result;
use crate::index::{DocId, IndexReader, Posting, Postings, TERMINATED};
use crate::scoring::{idf, term_score};

use super::scorer::Scorer;

/// Cursor over one term's postings.
pub struct TermScorer<'a> {
    reader: &'a dyn IndexReader,
    field: String,
    postings: Postings<'a>,
    current: Option<Posting>,
    doc_count: u32,
    doc_freq: u32,
}

impl<'a> TermScorer<'a> {
    pub fn new(reader: &'a dyn IndexReader, field: &str, term: &str) -> Result<Self> {
        let doc_freq = reader.document_frequency(field, term)?;
        let mut postings = reader.postings(field, term)?;
        let current = postings.next().transpose()?;
        Ok(Self {
            reader,
            field: field.to_string(),
            postings,
            current,
            doc_count: reader.total_document_count(),
            doc_freq,
        })
    }

    /// Posting of the current document.
    pub fn posting(&self) -> Option<&Posting> {
        self.current.as_ref()
    }

    pub fn doc_freq(&self) -> u32 {
        self.doc_freq
    }

    pub fn idf(&self) -> f64 {
        idf(self.doc_count, self.doc_freq)
    }
}

impl Scorer for TermScorer<'_> {
    fn doc(&self) -> DocId {
        self.current.as_ref().map_or(TERMINATED, |p| p.doc_id)
    }

    fn advance(&mut self) -> Result<DocId> {
        self.current = self.postings.next().transpose()?;
        Ok(self.doc())
    }

    fn score(&mut self) -> Result<f64> {
        let Some(posting) = &self.current else {
            return Ok(0.0);
        };
        let length = self.reader.field_length(posting.doc_id, &self.field)?;
        Ok(term_score(posting.term_freq, self.doc_count, self.doc_freq, length))
    }

    fn cost(&self) -> u64 {
        u64::from(self.doc_freq)
    }
}
