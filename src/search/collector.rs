// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounded top-K selection over a stream of scored documents.
//!
//! Holds at most `k` candidates in a heap whose top is the worst one kept.
//! Memory is O(k) no matter how many documents match, and because ranking is
//! a total order the kept set never depends on arrival order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{Result, SearchError};
use crate::scoring::ranking::compare_scored;

use super::ScoredDocument;

/// Heap entry ordered so that "greater" means "ranks lower".
#[derive(Debug, Clone)]
struct Ranked(ScoredDocument);

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_scored(&self.0, &other.0)
    }
}

#[derive(Debug, Clone)]
pub struct TopKSelector {
    k: usize,
    heap: BinaryHeap<Ranked>,
    total: u64,
}

impl TopKSelector {
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(SearchError::InvalidArgument(
                "max results must be at least 1".into(),
            ));
        }
        Ok(Self {
            k,
            heap: BinaryHeap::with_capacity(k.min(1024) + 1),
            total: 0,
        })
    }

    pub fn collect(&mut self, doc: ScoredDocument) {
        self.total += 1;
        if self.heap.len() < self.k {
            self.heap.push(Ranked(doc));
            return;
        }
        let beats_worst = self
            .heap
            .peek()
            .is_some_and(|worst| compare_scored(&doc, &worst.0) == Ordering::Less);
        if beats_worst {
            self.heap.pop();
            self.heap.push(Ranked(doc));
        }
    }

    /// Every document offered so far, kept or not.
    pub fn total_matched(&self) -> u64 {
        self.total
    }

    /// Best first, plus the total match count.
    pub fn into_sorted(self) -> (Vec<ScoredDocument>, u64) {
        let hits = self.heap.into_sorted_vec().into_iter().map(|r| r.0).collect();
        (hits, self.total)
    }
}

/// Drain `docs` and keep the best `k`.
pub fn select<I>(docs: I, k: usize) -> Result<(Vec<ScoredDocument>, u64)>
where
    I: IntoIterator<Item = Result<ScoredDocument>>,
{
    let mut selector = TopKSelector::new(k)?;
    for doc in docs {
        selector.collect(doc?);
    }
    Ok(selector.into_sorted())
}
