// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how scored documents get sorted.
//!
//! Sort order:
//! 1. **Score** - descending, compared with `total_cmp` so NaN can't break the order
//! 2. **Doc ID** - ascending
//! 3. **Sequence** - ascending, the order the evaluator produced them in
//!
//! The result is a total order: two distinct candidates never compare equal,
//! so top-K selection is deterministic.

use std::cmp::Ordering;

use crate::search::ScoredDocument;

/// `Less` means `a` ranks above `b`.
pub fn compare_scored(a: &ScoredDocument, b: &ScoredDocument) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.doc_id.cmp(&b.doc_id))
        .then_with(|| a.seq.cmp(&b.seq))
}
