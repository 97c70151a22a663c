// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Compiles a [`Query`] into a scorer tree and streams its matches.

use crate::error::{Result, SearchError};
use crate::index::{IndexReader, TERMINATED};
use crate::query::{Occur, Query, WildcardPattern};

use super::boolean::{BooleanScorer, ConjunctionScorer, DisjunctionScorer};
use super::phrase::PhraseScorer;
use super::scorer::{BoostScorer, EmptyScorer, Scorer};
use super::term::TermScorer;
use super::ScoredDocument;

/// Deepest query tree [`evaluate`] accepts. Parsed queries stay far below
/// it; hand-built trees past it are rejected instead of recursing further.
pub const MAX_QUERY_DEPTH: usize = 1024;

/// Matching documents in ascending doc id order, each scored exactly once.
///
/// `seq` counts up from 0 in production order. The first error ends the
/// stream.
pub struct ScoredDocs<'a> {
    scorer: Box<dyn Scorer + 'a>,
    seq: u64,
    started: bool,
    failed: bool,
}

impl ScoredDocs<'_> {
    fn step(&mut self) -> Result<Option<ScoredDocument>> {
        let doc = if self.started {
            self.scorer.advance()?
        } else {
            self.started = true;
            self.scorer.doc()
        };
        if doc == TERMINATED {
            return Ok(None);
        }
        let score = self.scorer.score()?;
        let seq = self.seq;
        self.seq += 1;
        Ok(Some(ScoredDocument {
            doc_id: doc,
            score,
            seq,
        }))
    }
}

impl Iterator for ScoredDocs<'_> {
    type Item = Result<ScoredDocument>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.step() {
            Ok(next) => next.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Evaluate `query` against `reader`.
pub fn evaluate<'a>(query: &Query, reader: &'a dyn IndexReader) -> Result<ScoredDocs<'a>> {
    Ok(ScoredDocs {
        scorer: build_scorer(query, reader, 0)?,
        seq: 0,
        started: false,
        failed: false,
    })
}

fn empty<'a>() -> Box<dyn Scorer + 'a> {
    Box::new(EmptyScorer)
}

fn build_scorer<'a>(
    query: &Query,
    reader: &'a dyn IndexReader,
    depth: usize,
) -> Result<Box<dyn Scorer + 'a>> {
    if depth > MAX_QUERY_DEPTH {
        return Err(SearchError::InvalidArgument(format!(
            "query nests deeper than {} levels",
            MAX_QUERY_DEPTH
        )));
    }
    match query {
        Query::Term { field, text } => term_scorer(reader, field, text),
        Query::Wildcard { field, pattern } => wildcard_scorer(reader, field, pattern),
        Query::Phrase {
            field,
            tokens,
            slop,
        } => match tokens.as_slice() {
            [] => Ok(empty()),
            [single] => term_scorer(reader, field, &single.text),
            _ => {
                let terms: Vec<(&str, u32)> =
                    tokens.iter().map(|t| (t.text.as_str(), t.position)).collect();
                for (text, _) in &terms {
                    if reader.document_frequency(field, text)? == 0 {
                        return Ok(empty());
                    }
                }
                Ok(Box::new(PhraseScorer::new(reader, field, &terms, *slop)?))
            }
        },
        Query::Boolean(clauses) => {
            let mut must = Vec::new();
            let mut should = Vec::new();
            let mut must_not = Vec::new();
            for clause in clauses {
                let scorer = build_scorer(&clause.query, reader, depth + 1)?;
                match clause.occur {
                    Occur::Must => must.push(scorer),
                    Occur::Should => should.push(scorer),
                    Occur::MustNot => must_not.push(scorer),
                }
            }
            boolean_scorer(must, should, must_not)
        }
        Query::Boost { query, boost } => Ok(Box::new(BoostScorer::new(
            build_scorer(query, reader, depth + 1)?,
            *boost,
        ))),
    }
}

fn term_scorer<'a>(
    reader: &'a dyn IndexReader,
    field: &str,
    text: &str,
) -> Result<Box<dyn Scorer + 'a>> {
    if reader.document_frequency(field, text)? == 0 {
        return Ok(empty());
    }
    Ok(Box::new(TermScorer::new(reader, field, text)?))
}

/// A wildcard is the disjunction of every indexed term it matches.
fn wildcard_scorer<'a>(
    reader: &'a dyn IndexReader,
    field: &str,
    pattern: &str,
) -> Result<Box<dyn Scorer + 'a>> {
    let compiled = WildcardPattern::new(pattern)?;
    let terms: Vec<String> = reader
        .terms_with_prefix(field, compiled.literal_prefix())?
        .into_iter()
        .filter(|t| compiled.is_match(t))
        .collect();
    log::debug!("{}:{} expanded to {} terms", field, pattern, terms.len());

    match terms.as_slice() {
        [] => Ok(empty()),
        [single] => term_scorer(reader, field, single),
        _ => {
            let children = terms
                .iter()
                .map(|t| term_scorer(reader, field, t))
                .collect::<Result<Vec<_>>>()?;
            Ok(Box::new(DisjunctionScorer::new(children)))
        }
    }
}

fn boolean_scorer<'a>(
    must: Vec<Box<dyn Scorer + 'a>>,
    should: Vec<Box<dyn Scorer + 'a>>,
    must_not: Vec<Box<dyn Scorer + 'a>>,
) -> Result<Box<dyn Scorer + 'a>> {
    let union = |mut scorers: Vec<Box<dyn Scorer + 'a>>| -> Option<Box<dyn Scorer + 'a>> {
        match scorers.len() {
            0 => None,
            1 => scorers.pop(),
            _ => Some(Box::new(DisjunctionScorer::new(scorers))),
        }
    };

    let optional = union(should);
    let excluded = union(must_not);

    // Required clauses drive; should clauses then only contribute score.
    let (driver, optional) = match must.len() {
        0 => match optional {
            Some(optional) => (optional, None),
            // Only prohibited clauses: nothing can match.
            None => return Ok(empty()),
        },
        1 => match must.into_iter().next() {
            Some(single) => (single, optional),
            None => return Ok(empty()),
        },
        _ => (
            Box::new(ConjunctionScorer::new(must)?) as Box<dyn Scorer + 'a>,
            optional,
        ),
    };

    if optional.is_none() && excluded.is_none() {
        return Ok(driver);
    }
    Ok(Box::new(BooleanScorer::new(driver, optional, excluded)?))
}
