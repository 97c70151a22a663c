// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalyzerConfig;
use crate::error::{Result, SearchError};

pub const MANIFEST_FILE_NAME: &str = "manifest.json";
pub const INDEX_FILE_NAME: &str = "index.isx";

/// Manifest format version
pub const MANIFEST_VERSION: u32 = 1;

/// `manifest.json`: describes the index file next to it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Manifest {
    pub version: u32,
    pub doc_count: u32,
    pub fields: Vec<String>,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

impl Manifest {
    pub fn new(doc_count: u32, fields: Vec<String>, analyzer: AnalyzerConfig) -> Self {
        Self {
            version: MANIFEST_VERSION,
            doc_count,
            fields,
            analyzer,
        }
    }

    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE_NAME);
        let text = fs::read_to_string(&path).map_err(|e| {
            SearchError::IndexUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        let manifest: Manifest = serde_json::from_str(&text).map_err(|e| {
            SearchError::IndexUnavailable(format!("invalid {}: {}", path.display(), e))
        })?;
        if manifest.version != MANIFEST_VERSION {
            return Err(SearchError::IndexUnavailable(format!(
                "unsupported manifest version {} (expected {})",
                manifest.version, MANIFEST_VERSION
            )));
        }
        Ok(manifest)
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        let path = dir.join(MANIFEST_FILE_NAME);
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SearchError::IndexUnavailable(format!("cannot encode manifest: {}", e)))?;
        fs::write(&path, json).map_err(|e| {
            SearchError::IndexUnavailable(format!("cannot write {}: {}", path.display(), e))
        })
    }
}
