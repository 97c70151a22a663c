// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Wildcard patterns: `*` matches any run of characters, `?` exactly one.
//!
//! A backslash makes the next character literal, so `a\*b` only matches the
//! term "a*b". Patterns compile to an anchored regex; the literal prefix before
//! the first wildcard narrows the dictionary scan to a sorted range.

use regex::Regex;

use crate::error::{Result, SearchError};

/// A compiled wildcard pattern.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    source: String,
    prefix: String,
    regex: Regex,
}

impl WildcardPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let mut regex_src = String::with_capacity(pattern.len() + 8);
        regex_src.push('^');
        let mut prefix = String::new();
        let mut in_prefix = true;
        let mut chars = pattern.chars();

        while let Some(c) = chars.next() {
            match c {
                '*' => {
                    in_prefix = false;
                    regex_src.push_str(".*");
                }
                '?' => {
                    in_prefix = false;
                    regex_src.push('.');
                }
                '\\' => {
                    let literal = chars.next().unwrap_or('\\');
                    if in_prefix {
                        prefix.push(literal);
                    }
                    regex_src.push_str(&regex::escape(literal.encode_utf8(&mut [0; 4])));
                }
                other => {
                    if in_prefix {
                        prefix.push(other);
                    }
                    regex_src.push_str(&regex::escape(other.encode_utf8(&mut [0; 4])));
                }
            }
        }
        regex_src.push('$');

        let regex = Regex::new(&regex_src).map_err(|e| {
            SearchError::InvalidArgument(format!("bad wildcard pattern '{}': {}", pattern, e))
        })?;

        Ok(Self {
            source: pattern.to_string(),
            prefix,
            regex,
        })
    }

    /// Literal characters before the first unescaped wildcard.
    pub fn literal_prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_match(&self, term: &str) -> bool {
        self.regex.is_match(term)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Does `text` contain an unescaped `*` or `?`
pub fn has_wildcard(text: &str) -> bool {
    let mut escaped = false;
    for c in text.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '*' | '?' => return true,
            _ => {}
        }
    }
    false
}

/// Does the pattern start with an unescaped wildcard
pub fn has_leading_wildcard(text: &str) -> bool {
    matches!(text.chars().next(), Some('*' | '?'))
}

/// Drop escaping backslashes: `a\*b` becomes `a*b`.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            out.push(chars.next().unwrap_or('\\'));
        } else {
            out.push(c);
        }
    }
    out
}
