// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Boolean combinators: conjunction, disjunction and exclusion.
//!
//! All three keep their children positioned and only ever move them forward,
//! so a whole query tree is one merge pass over its postings.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::Result;
use crate::index::{DocId, TERMINATED};

use super::scorer::Scorer;

// ============================================================================
// CONJUNCTION
// ============================================================================

/// Documents matched by every child. Score is the sum of child scores.
pub struct ConjunctionScorer<'a> {
    /// Cheapest first, so the rarest child leads.
    children: Vec<Box<dyn Scorer + 'a>>,
    doc: DocId,
}

impl<'a> ConjunctionScorer<'a> {
    pub fn new(mut children: Vec<Box<dyn Scorer + 'a>>) -> Result<Self> {
        children.sort_by_key(|c| c.cost());
        let mut scorer = Self {
            children,
            doc: TERMINATED,
        };
        let first = scorer.children.first().map_or(TERMINATED, |c| c.doc());
        scorer.doc = scorer.align(first)?;
        Ok(scorer)
    }

    fn align(&mut self, mut candidate: DocId) -> Result<DocId> {
        'outer: loop {
            if candidate == TERMINATED {
                return Ok(TERMINATED);
            }
            for child in &mut self.children {
                let doc = child.seek(candidate)?;
                if doc > candidate {
                    candidate = doc;
                    continue 'outer;
                }
            }
            return Ok(candidate);
        }
    }
}

impl Scorer for ConjunctionScorer<'_> {
    fn doc(&self) -> DocId {
        self.doc
    }

    fn advance(&mut self) -> Result<DocId> {
        if self.doc == TERMINATED {
            return Ok(TERMINATED);
        }
        let next = self.children[0].advance()?;
        self.doc = self.align(next)?;
        Ok(self.doc)
    }

    fn seek(&mut self, target: DocId) -> Result<DocId> {
        if self.doc >= target {
            return Ok(self.doc);
        }
        let next = self.children[0].seek(target)?;
        self.doc = self.align(next)?;
        Ok(self.doc)
    }

    fn score(&mut self) -> Result<f64> {
        let mut total = 0.0;
        for child in &mut self.children {
            total += child.score()?;
        }
        Ok(total)
    }

    fn cost(&self) -> u64 {
        self.children.first().map_or(0, |c| c.cost())
    }
}

// ============================================================================
// DISJUNCTION
// ============================================================================

/// Documents matched by any child. Score is the sum over the children that
/// match the current document.
pub struct DisjunctionScorer<'a> {
    children: Vec<Box<dyn Scorer + 'a>>,
    /// Children ahead of the current document, keyed by their doc.
    queue: BinaryHeap<Reverse<(DocId, usize)>>,
    /// Children sitting on the current document.
    matched: Vec<usize>,
    doc: DocId,
}

impl<'a> DisjunctionScorer<'a> {
    pub fn new(children: Vec<Box<dyn Scorer + 'a>>) -> Self {
        let queue = children
            .iter()
            .enumerate()
            .filter(|(_, c)| c.doc() != TERMINATED)
            .map(|(i, c)| Reverse((c.doc(), i)))
            .collect();
        let mut scorer = Self {
            children,
            queue,
            matched: Vec::new(),
            doc: TERMINATED,
        };
        scorer.settle();
        scorer
    }

    /// Pop every child on the smallest doc into `matched`.
    fn settle(&mut self) {
        self.matched.clear();
        let Some(&Reverse((doc, _))) = self.queue.peek() else {
            self.doc = TERMINATED;
            return;
        };
        self.doc = doc;
        while let Some(&Reverse((d, i))) = self.queue.peek() {
            if d != doc {
                break;
            }
            self.queue.pop();
            self.matched.push(i);
        }
    }

    fn requeue(&mut self, i: usize, doc: DocId) {
        if doc != TERMINATED {
            self.queue.push(Reverse((doc, i)));
        }
    }
}

impl Scorer for DisjunctionScorer<'_> {
    fn doc(&self) -> DocId {
        self.doc
    }

    fn advance(&mut self) -> Result<DocId> {
        for i in std::mem::take(&mut self.matched) {
            let doc = self.children[i].advance()?;
            self.requeue(i, doc);
        }
        self.settle();
        Ok(self.doc)
    }

    fn seek(&mut self, target: DocId) -> Result<DocId> {
        if self.doc >= target {
            return Ok(self.doc);
        }
        for i in std::mem::take(&mut self.matched) {
            let doc = self.children[i].seek(target)?;
            self.requeue(i, doc);
        }
        while let Some(&Reverse((doc, i))) = self.queue.peek() {
            if doc >= target {
                break;
            }
            self.queue.pop();
            let doc = self.children[i].seek(target)?;
            self.requeue(i, doc);
        }
        self.settle();
        Ok(self.doc)
    }

    fn score(&mut self) -> Result<f64> {
        let mut total = 0.0;
        for &i in &self.matched {
            total += self.children[i].score()?;
        }
        Ok(total)
    }

    fn cost(&self) -> u64 {
        self.children.iter().map(|c| c.cost()).sum()
    }
}

// ============================================================================
// BOOLEAN
// ============================================================================

/// A driving scorer plus optional score contributors and exclusions.
///
/// With required clauses the driver is their conjunction and the optional
/// clauses only add score. Without them the driver is the disjunction of the
/// optional clauses. Either way a document matched by `excluded` is skipped.
pub struct BooleanScorer<'a> {
    driver: Box<dyn Scorer + 'a>,
    optional: Option<Box<dyn Scorer + 'a>>,
    excluded: Option<Box<dyn Scorer + 'a>>,
    doc: DocId,
}

impl<'a> BooleanScorer<'a> {
    pub fn new(
        driver: Box<dyn Scorer + 'a>,
        optional: Option<Box<dyn Scorer + 'a>>,
        excluded: Option<Box<dyn Scorer + 'a>>,
    ) -> Result<Self> {
        let mut scorer = Self {
            driver,
            optional,
            excluded,
            doc: TERMINATED,
        };
        let first = scorer.driver.doc();
        scorer.doc = scorer.skip_excluded(first)?;
        Ok(scorer)
    }

    fn skip_excluded(&mut self, mut candidate: DocId) -> Result<DocId> {
        while candidate != TERMINATED {
            let Some(excluded) = &mut self.excluded else {
                break;
            };
            if excluded.seek(candidate)? != candidate {
                break;
            }
            candidate = self.driver.advance()?;
        }
        Ok(candidate)
    }
}

impl Scorer for BooleanScorer<'_> {
    fn doc(&self) -> DocId {
        self.doc
    }

    fn advance(&mut self) -> Result<DocId> {
        if self.doc == TERMINATED {
            return Ok(TERMINATED);
        }
        let next = self.driver.advance()?;
        self.doc = self.skip_excluded(next)?;
        Ok(self.doc)
    }

    fn seek(&mut self, target: DocId) -> Result<DocId> {
        if self.doc >= target {
            return Ok(self.doc);
        }
        let next = self.driver.seek(target)?;
        self.doc = self.skip_excluded(next)?;
        Ok(self.doc)
    }

    fn score(&mut self) -> Result<f64> {
        let mut total = self.driver.score()?;
        if let Some(optional) = &mut self.optional {
            if optional.seek(self.doc)? == self.doc {
                total += optional.score()?;
            }
        }
        Ok(total)
    }

    fn cost(&self) -> u64 {
        self.driver.cost()
    }
}
