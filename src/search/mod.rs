// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query evaluation.
//!
//! A parsed [`Query`](crate::query::Query) compiles to a tree of [`Scorer`]
//! cursors over postings. The tree yields every matching document once, in
//! ascending doc id order, with its score. A bounded heap keeps the best K.
//!
//! ```text
//! Query ──▶ scorer tree ──▶ ScoredDocs ──▶ TopKSelector ──▶ SearchResult
//!           term / phrase    (doc, score,    O(K) memory
//!           and / or / not    seq) stream
//! ```

mod boolean;
mod collector;
mod evaluator;
mod phrase;
mod scorer;
mod session;
mod term;

pub use boolean::{BooleanScorer, ConjunctionScorer, DisjunctionScorer};
pub use collector::{select, TopKSelector};
pub use evaluator::{evaluate, ScoredDocs};
pub use phrase::PhraseScorer;
pub use scorer::{BoostScorer, EmptyScorer, Scorer};
pub use session::{search, search_batch, SearchResult, Searcher};
pub use term::TermScorer;

use serde::Serialize;

use crate::index::DocId;

/// A matching document and its score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredDocument {
    pub doc_id: DocId,
    pub score: f64,
    /// Production order within one evaluation. Last-resort tie-break.
    pub seq: u64,
}
