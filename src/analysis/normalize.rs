// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Diacritic folding for accent-insensitive matching.
//!
//! - "café" → "cafe"
//! - "naïve" → "naive"
//! - "tōkyō" → "tokyo"
//!
//! With the `unicode-normalization` feature the word is NFD-decomposed and
//! nonspacing marks are dropped. Without it the word passes through unchanged
//! and the analyzer behaves as if folding were disabled.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Strip combining marks from an already lowercased word.
#[cfg(feature = "unicode-normalization")]
pub fn fold_diacritics(word: &str) -> String {
    if word.is_ascii() {
        return word.to_string();
    }
    word.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

#[cfg(not(feature = "unicode-normalization"))]
pub fn fold_diacritics(word: &str) -> String {
    word.to_string()
}

/// Combining marks (Unicode category Mn) in the Latin/Greek/Cyrillic
/// diacritic blocks.
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}
