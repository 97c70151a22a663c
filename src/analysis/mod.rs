// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text analysis: raw text in, normalized tokens out.
//!
//! The same analyzer runs at index time and at query time, which is why its
//! configuration lives in the index manifest. If the two disagree, "Running"
//! gets indexed as "run" and queried as "running", and nothing matches.
//!
//! Pipeline, in order:
//!
//! 1. Split on anything that isn't a letter or digit (Unicode aware)
//! 2. Lowercase
//! 3. Fold diacritics (optional)
//! 4. Drop stop words (optional, positions still advance)
//! 5. Stem (optional, Snowball English)
//!
//! The default configuration does steps 1-2 only.

mod normalize;

pub use normalize::fold_diacritics;

use std::collections::HashSet;
use std::str::CharIndices;

use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};

/// A normalized token and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// Position in the token stream. Removed stop words leave gaps.
    pub position: u32,
    /// Byte offset of the first character in the original text
    pub offset_from: usize,
    /// Byte offset one past the last character in the original text
    pub offset_to: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, position: u32, offset_from: usize, offset_to: usize) -> Self {
        Self {
            text: text.into(),
            position,
            offset_from,
            offset_to,
        }
    }
}

/// Which words to drop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopWords {
    #[default]
    None,
    /// English list from the stop-words crate
    English,
    /// Caller-supplied words, compared after lowercasing and folding
    Custom(Vec<String>),
}

/// Analyzer settings. Persisted with the index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub fold_diacritics: bool,
    pub stop_words: StopWords,
    pub stemming: bool,
}

/// Turns text into tokens. Cheap to share; holds no per-call state.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    stop_words: HashSet<String>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let stop_words: HashSet<String> = match &config.stop_words {
            StopWords::None => HashSet::new(),
            StopWords::English => stop_words::get(stop_words::LANGUAGE::English)
                .into_iter()
                .map(|s| s.to_string())
                .collect(),
            StopWords::Custom(words) => words.iter().map(|w| w.to_lowercase()).collect(),
        };
        Self { config, stop_words }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Lazily analyze `text`. Calling again on the same input yields the same tokens.
    pub fn analyze<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Token> + 'a {
        let stemmer = self
            .config
            .stemming
            .then(|| Stemmer::create(Algorithm::English));

        WordSpans::new(text)
            .enumerate()
            .filter_map(move |(position, (from, to))| {
                let mut word = text[from..to].to_lowercase();
                if self.config.fold_diacritics {
                    word = fold_diacritics(&word);
                }
                if self.stop_words.contains(&word) {
                    return None;
                }
                if let Some(stemmer) = &stemmer {
                    word = stemmer.stem(&word).into_owned();
                }
                Some(Token::new(word, position as u32, from, to))
            })
    }

    /// Analyzed token texts, in order.
    pub fn terms(&self, text: &str) -> Vec<String> {
        self.analyze(text).map(|t| t.text).collect()
    }
}

/// Byte spans of maximal letter/digit runs.
struct WordSpans<'a> {
    chars: CharIndices<'a>,
    len: usize,
}

impl<'a> WordSpans<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.char_indices(),
            len: text.len(),
        }
    }
}

impl Iterator for WordSpans<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let start = loop {
            let (i, c) = self.chars.next()?;
            if c.is_alphanumeric() {
                break i;
            }
        };
        for (i, c) in self.chars.by_ref() {
            if !c.is_alphanumeric() {
                return Some((start, i));
            }
        }
        Some((start, self.len))
    }
}
