// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query tree: what the parser produces and the evaluator consumes.
//!
//! A query is built once per search and owned by whoever runs the search.
//! The evaluator only borrows it. `Display` renders the classic query-parser
//! notation (`+text:quick -text:dog*`), which is also what the logs show.

mod parser;
mod wildcard;

pub use parser::{parse_query, QueryParser};
pub use wildcard::WildcardPattern;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::Token;

/// How a clause participates in a boolean query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occur {
    /// Required: documents must match
    Must,
    /// Optional: contributes score, required only when nothing else is
    Should,
    /// Prohibited: matching documents are excluded
    MustNot,
}

impl Occur {
    fn prefix(self) -> &'static str {
        match self {
            Occur::Must => "+",
            Occur::Should => "",
            Occur::MustNot => "-",
        }
    }
}

/// One clause of a boolean query.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanClause {
    pub query: Query,
    pub occur: Occur,
}

impl BooleanClause {
    pub fn new(query: Query, occur: Occur) -> Self {
        Self { query, occur }
    }
}

/// A parsed query.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Exact match on one normalized term.
    Term { field: String, text: String },
    /// `*` and `?` pattern over the term dictionary.
    Wildcard { field: String, pattern: String },
    /// Ordered tokens; token positions give the expected relative offsets.
    Phrase {
        field: String,
        tokens: Vec<Token>,
        slop: u32,
    },
    /// MUST/SHOULD/MUST_NOT combination. Matches nothing without a MUST or SHOULD clause.
    Boolean(Vec<BooleanClause>),
    /// Scales the wrapped query's score.
    Boost { query: Box<Query>, boost: f64 },
}

impl Query {
    pub fn term(field: impl Into<String>, text: impl Into<String>) -> Self {
        Query::Term {
            field: field.into(),
            text: text.into(),
        }
    }

    pub fn wildcard(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Query::Wildcard {
            field: field.into(),
            pattern: pattern.into(),
        }
    }

    /// Phrase from already-normalized words at consecutive positions.
    pub fn phrase<S: AsRef<str>>(field: impl Into<String>, words: &[S], slop: u32) -> Self {
        let tokens = words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(w.as_ref(), i as u32, 0, 0))
            .collect();
        Query::Phrase {
            field: field.into(),
            tokens,
            slop,
        }
    }

    pub fn boolean(clauses: Vec<BooleanClause>) -> Self {
        Query::Boolean(clauses)
    }

    /// True when the query can never match, regardless of the index.
    pub fn matches_nothing(&self) -> bool {
        match self {
            Query::Boolean(clauses) => {
                let positive: Vec<&BooleanClause> =
                    clauses.iter().filter(|c| c.occur != Occur::MustNot).collect();
                positive.is_empty()
                    || positive
                        .iter()
                        .filter(|c| c.occur == Occur::Must)
                        .any(|c| c.query.matches_nothing())
                    || positive.iter().all(|c| c.query.matches_nothing())
            }
            Query::Phrase { tokens, .. } => tokens.is_empty(),
            Query::Boost { query, .. } => query.matches_nothing(),
            Query::Term { .. } | Query::Wildcard { .. } => false,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Term { field, text } => write!(f, "{}:{}", field, text),
            Query::Wildcard { field, pattern } => write!(f, "{}:{}", field, pattern),
            Query::Phrase {
                field,
                tokens,
                slop,
            } => {
                let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
                write!(f, "{}:\"{}\"", field, words.join(" "))?;
                if *slop > 0 {
                    write!(f, "~{}", slop)?;
                }
                Ok(())
            }
            Query::Boolean(clauses) => {
                for (i, clause) in clauses.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    f.write_str(clause.occur.prefix())?;
                    match &clause.query {
                        Query::Boolean(_) => write!(f, "({})", clause.query)?,
                        other => write!(f, "{}", other)?,
                    }
                }
                Ok(())
            }
            Query::Boost { query, boost } => match query.as_ref() {
                Query::Boolean(_) => write!(f, "({})^{:?}", query, boost),
                other => write!(f, "{}^{:?}", other, boost),
            },
        }
    }
}
