// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Positional phrase matching.
//!
//! A document matches when every phrase term occurs, in phrase order, such
//! that the total extra distance between consecutive terms is at most `slop`.
//! Token `i` is expected `offsets[i]` positions after token 0, where offsets
//! come from the analyzed query tokens (so removed stop words leave gaps).
//!
//! For each occurrence of the first term, every following term greedily takes
//! its earliest occurrence at or after the expected position. Greedy picks
//! give the smallest possible end position, so the displacement found is
//! minimal for that start.

use crate::error::Result;
use crate::index::{DocId, IndexReader, TERMINATED};
use crate::scoring::phrase_score;

use super::scorer::Scorer;
use super::term::TermScorer;

pub struct PhraseScorer<'a> {
    reader: &'a dyn IndexReader,
    field: String,
    terms: Vec<TermScorer<'a>>,
    /// Expected position of each term relative to the first.
    offsets: Vec<u32>,
    slop: u32,
    idf_sum: f64,
    doc: DocId,
    /// (match count, smallest displacement) in the current document.
    current: (u32, u32),
}

impl<'a> PhraseScorer<'a> {
    /// `terms` are `(text, query position)` in phrase order; at least two.
    pub fn new(
        reader: &'a dyn IndexReader,
        field: &str,
        terms: &[(&str, u32)],
        slop: u32,
    ) -> Result<Self> {
        let base = terms.first().map_or(0, |t| t.1);
        let offsets = terms.iter().map(|t| t.1.saturating_sub(base)).collect();
        let scorers = terms
            .iter()
            .map(|(text, _)| TermScorer::new(reader, field, text))
            .collect::<Result<Vec<_>>>()?;
        let idf_sum = scorers.iter().map(TermScorer::idf).sum();

        let mut phrase = Self {
            reader,
            field: field.to_string(),
            terms: scorers,
            offsets,
            slop,
            idf_sum,
            doc: TERMINATED,
            current: (0, 0),
        };
        let first = phrase.terms.first().map_or(TERMINATED, Scorer::doc);
        phrase.doc = phrase.find_match(first)?;
        Ok(phrase)
    }

    /// Next document `>= candidate` that contains the phrase.
    fn find_match(&mut self, mut candidate: DocId) -> Result<DocId> {
        loop {
            candidate = self.align(candidate)?;
            if candidate == TERMINATED {
                return Ok(TERMINATED);
            }
            if let Some(found) = self.match_positions() {
                self.current = found;
                return Ok(candidate);
            }
            candidate = self.terms[0].advance()?;
        }
    }

    /// Leapfrog until every term sits on the same document.
    fn align(&mut self, mut candidate: DocId) -> Result<DocId> {
        'outer: loop {
            if candidate == TERMINATED {
                return Ok(TERMINATED);
            }
            for term in &mut self.terms {
                let doc = term.seek(candidate)?;
                if doc > candidate {
                    candidate = doc;
                    continue 'outer;
                }
            }
            return Ok(candidate);
        }
    }

    fn match_positions(&self) -> Option<(u32, u32)> {
        let lists: Vec<&[u32]> = self
            .terms
            .iter()
            .map(|t| t.posting().map_or(&[][..], |p| p.positions.as_slice()))
            .collect();
        count_matches(&lists, &self.offsets, self.slop)
    }
}

/// `(matches, min displacement)`, or `None` when the phrase does not occur.
pub(crate) fn count_matches(lists: &[&[u32]], offsets: &[u32], slop: u32) -> Option<(u32, u32)> {
    let (first, rest) = lists.split_first()?;
    let last_offset = offsets.last().copied().unwrap_or(0);
    let mut matches = 0u32;
    let mut best = u32::MAX;

    'starts: for &start in first.iter() {
        let mut prev = start;
        for (i, list) in rest.iter().enumerate() {
            let gap = offsets[i + 1].saturating_sub(offsets[i]);
            let required = prev.saturating_add(gap);
            let idx = list.partition_point(|&p| p < required);
            match list.get(idx) {
                Some(&p) => prev = p,
                // later starts cannot do better
                None => break 'starts,
            }
        }
        let displacement = prev.saturating_sub(start).saturating_sub(last_offset);
        if displacement <= slop {
            matches += 1;
            best = best.min(displacement);
        }
    }

    (matches > 0).then_some((matches, best))
}

impl Scorer for PhraseScorer<'_> {
    fn doc(&self) -> DocId {
        self.doc
    }

    fn advance(&mut self) -> Result<DocId> {
        if self.doc == TERMINATED {
            return Ok(TERMINATED);
        }
        let next = self.terms[0].advance()?;
        self.doc = self.find_match(next)?;
        Ok(self.doc)
    }

    fn seek(&mut self, target: DocId) -> Result<DocId> {
        if self.doc >= target {
            return Ok(self.doc);
        }
        let next = self.terms[0].seek(target)?;
        self.doc = self.find_match(next)?;
        Ok(self.doc)
    }

    fn score(&mut self) -> Result<f64> {
        if self.doc == TERMINATED {
            return Ok(0.0);
        }
        let length = self.reader.field_length(self.doc, &self.field)?;
        let (matches, displacement) = self.current;
        Ok(phrase_score(matches, self.idf_sum, length, displacement))
    }

    fn cost(&self) -> u64 {
        self.terms.iter().map(Scorer::cost).min().unwrap_or(0)
    }
}
