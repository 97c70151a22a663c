// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search configuration, resolved once before a query is parsed.
//!
//! Layering is defaults, then an optional JSON file, then command line flags.
//! Analyzer settings are not here: they belong to the index and are read
//! from its manifest.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::query::Occur;

/// Field searched by clauses without a `field:` prefix.
pub const DEFAULT_FIELD: &str = "field";

/// Result limit when none is given.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Knobs for the query parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Accept `*foo` and `?oo`. These scan the whole term dictionary.
    pub allow_leading_wildcard: bool,
    /// Occurrence of clauses with no operator. `Must` or `Should`.
    pub default_occur: Occur,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            allow_leading_wildcard: false,
            default_occur: Occur::Should,
        }
    }
}

impl ParserOptions {
    pub fn validate(&self) -> Result<()> {
        if self.default_occur == Occur::MustNot {
            return Err(SearchError::InvalidArgument(
                "default operator must be MUST or SHOULD".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_field: String,
    pub max_results: usize,
    pub parser: ParserOptions,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_field: DEFAULT_FIELD.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            parser: ParserOptions::default(),
        }
    }
}

impl SearchConfig {
    /// Load from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            SearchError::InvalidArgument(format!("cannot read config {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| SearchError::InvalidArgument(format!("invalid config: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(SearchError::InvalidArgument(
                "max results must be greater than zero".into(),
            ));
        }
        if self.default_field.is_empty() {
            return Err(SearchError::InvalidArgument(
                "default field must not be empty".into(),
            ));
        }
        self.parser.validate()
    }
}
