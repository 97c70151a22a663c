// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how matching documents get their numbers and order.
//!
//! Scores are classic TF-IDF, normalized by field length. Ranking is score
//! descending with doc id as the tie-break, so equal scores always come out
//! in the same order.

mod core;
pub mod ranking;

pub use self::core::*;
