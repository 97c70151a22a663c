// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind relevance.
//!
//! ```text
//! term score   = tf_weight(tf) · idf(N, df) · length_norm(len)
//! phrase score = tf_weight(matches) · Σ idf(N, df_i) · length_norm(len) · proximity(d)
//! ```
//!
//! | Piece          | Formula            | Effect                                    |
//! |----------------|--------------------|-------------------------------------------|
//! | `tf_weight`    | `1 + ln(tf)`       | repeats help, with diminishing returns    |
//! | `idf`          | `ln(1 + N / df)`   | rare terms weigh more, never negative     |
//! | `length_norm`  | `1 / sqrt(len)`    | a hit in a short field counts for more    |
//! | `proximity`    | `1 / (1 + d)`      | sloppy phrase matches score below exact   |
//!
//! These are stable: changing them reorders every result list.

/// Weight of a term occurring `tf` times. `tf == 0` scores nothing.
#[inline]
pub fn tf_weight(tf: u32) -> f64 {
    if tf == 0 {
        0.0
    } else {
        1.0 + f64::from(tf).ln()
    }
}

/// Inverse document frequency. Positive for every `df` in `1..=N`.
#[inline]
pub fn idf(doc_count: u32, doc_freq: u32) -> f64 {
    if doc_freq == 0 {
        return 0.0;
    }
    (1.0 + f64::from(doc_count) / f64::from(doc_freq)).ln()
}

/// Field length normalization. An empty field is treated as length 1.
#[inline]
pub fn length_norm(field_length: u32) -> f64 {
    1.0 / f64::from(field_length.max(1)).sqrt()
}

/// Phrase proximity factor for the smallest slop that matched.
#[inline]
pub fn proximity(displacement: u32) -> f64 {
    1.0 / (1.0 + f64::from(displacement))
}

/// Score of one term in one document.
#[inline]
pub fn term_score(tf: u32, doc_count: u32, doc_freq: u32, field_length: u32) -> f64 {
    tf_weight(tf) * idf(doc_count, doc_freq) * length_norm(field_length)
}

/// Score of a phrase in one document.
#[inline]
pub fn phrase_score(matches: u32, idf_sum: f64, field_length: u32, min_displacement: u32) -> f64 {
    tf_weight(matches) * idf_sum * length_norm(field_length) * proximity(min_displacement)
}
