// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The cursor abstraction every query node compiles to.
//!
//! A scorer is a forward-only cursor over ascending doc ids. It is positioned
//! on its first document as soon as it is built. `doc()` is the current
//! document or [`TERMINATED`]; `score()` scores the current document.
//!
//! Moving can fail because postings are decoded lazily and a corrupt list is
//! only discovered when it is read.

use crate::error::Result;
use crate::index::{DocId, TERMINATED};

pub trait Scorer {
    /// Current document, or [`TERMINATED`] once exhausted.
    fn doc(&self) -> DocId;

    /// Move to the next document.
    fn advance(&mut self) -> Result<DocId>;

    /// Move to the first document `>= target`. Never moves backwards.
    fn seek(&mut self, target: DocId) -> Result<DocId> {
        let mut doc = self.doc();
        while doc < target {
            doc = self.advance()?;
        }
        Ok(doc)
    }

    /// Score of the current document. Only meaningful before `TERMINATED`.
    fn score(&mut self) -> Result<f64>;

    /// Upper bound on the documents this cursor can still produce.
    fn cost(&self) -> u64;
}

impl Scorer for Box<dyn Scorer + '_> {
    #[inline]
    fn doc(&self) -> DocId {
        (**self).doc()
    }
    #[inline]
    fn advance(&mut self) -> Result<DocId> {
        (**self).advance()
    }
    #[inline]
    fn seek(&mut self, target: DocId) -> Result<DocId> {
        (**self).seek(target)
    }
    #[inline]
    fn score(&mut self) -> Result<f64> {
        (**self).score()
    }
    #[inline]
    fn cost(&self) -> u64 {
        (**self).cost()
    }
}

/// Matches nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyScorer;

impl Scorer for EmptyScorer {
    fn doc(&self) -> DocId {
        TERMINATED
    }
    fn advance(&mut self) -> Result<DocId> {
        Ok(TERMINATED)
    }
    fn seek(&mut self, _target: DocId) -> Result<DocId> {
        Ok(TERMINATED)
    }
    fn score(&mut self) -> Result<f64> {
        Ok(0.0)
    }
    fn cost(&self) -> u64 {
        0
    }
}

/// Multiplies the wrapped scorer's score.
pub struct BoostScorer<'a> {
    inner: Box<dyn Scorer + 'a>,
    boost: f64,
}

impl<'a> BoostScorer<'a> {
    pub fn new(inner: Box<dyn Scorer + 'a>, boost: f64) -> Self {
        Self { inner, boost }
    }
}

impl Scorer for BoostScorer<'_> {
    fn doc(&self) -> DocId {
        self.inner.doc()
    }
    fn advance(&mut self) -> Result<DocId> {
        self.inner.advance()
    }
    fn seek(&mut self, target: DocId) -> Result<DocId> {
        self.inner.seek(target)
    }
    fn score(&mut self) -> Result<f64> {
        Ok(self.inner.score()? * self.boost)
    }
    fn cost(&self) -> u64 {
        self.inner.cost()
    }
}

/// Fixed `(doc, score)` pairs. Test helper for the combinators.
#[cfg(test)]
pub(crate) struct VecScorer {
    entries: Vec<(DocId, f64)>,
    pos: usize,
}

#[cfg(test)]
impl VecScorer {
    pub(crate) fn new(docs: &[DocId]) -> Self {
        Self::scored(&docs.iter().map(|&d| (d, 1.0)).collect::<Vec<_>>())
    }

    pub(crate) fn scored(entries: &[(DocId, f64)]) -> Self {
        Self {
            entries: entries.to_vec(),
            pos: 0,
        }
    }

    pub(crate) fn boxed<'a>(docs: &[DocId]) -> Box<dyn Scorer + 'a> {
        Box::new(Self::new(docs))
    }
}

#[cfg(test)]
impl Scorer for VecScorer {
    fn doc(&self) -> DocId {
        self.entries.get(self.pos).map_or(TERMINATED, |e| e.0)
    }
    fn advance(&mut self) -> Result<DocId> {
        if self.pos < self.entries.len() {
            self.pos += 1;
        }
        Ok(self.doc())
    }
    fn score(&mut self) -> Result<f64> {
        Ok(self.entries.get(self.pos).map_or(0.0, |e| e.1))
    }
    fn cost(&self) -> u64 {
        (self.entries.len() - self.pos) as u64
    }
}

/// Drain a scorer into its doc ids.
#[cfg(test)]
pub(crate) fn collect_docs(scorer: &mut dyn Scorer) -> Vec<DocId> {
    let mut docs = Vec::new();
    let mut doc = scorer.doc();
    while doc != TERMINATED {
        docs.push(doc);
        doc = scorer.advance().unwrap();
    }
    docs
}
