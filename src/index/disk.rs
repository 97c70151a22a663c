// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index directory on disk.
//!
//! ```text
//! my-index/
//! ├── manifest.json   version, doc count, fields, analyzer settings
//! └── index.isx       binary index (see `binary`)
//! ```
//!
//! The file is read into memory and validated once at open. After that the
//! index never changes and never touches the filesystem again, so sharing
//! it between threads is just sharing a reference.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::manifest::{Manifest, INDEX_FILE_NAME};
use super::{DocId, IndexReader, Postings, StoredDocument};
use crate::analysis::AnalyzerConfig;
use crate::binary::IndexFile;
use crate::error::{Result, SearchError};

#[derive(Debug)]
pub struct DiskIndex {
    path: PathBuf,
    manifest: Manifest,
    file: IndexFile,
}

impl DiskIndex {
    /// Open and validate an index directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(SearchError::IndexUnavailable(format!(
                "{} is not an index directory",
                dir.display()
            )));
        }

        let manifest = Manifest::load(dir)?;
        Self::open_with_manifest(dir, manifest)
    }

    /// Open `index.isx` under `dir` against an already loaded manifest.
    pub fn open_with_manifest(dir: impl AsRef<Path>, manifest: Manifest) -> Result<Self> {
        let dir = dir.as_ref();
        let index_path = dir.join(INDEX_FILE_NAME);
        let bytes = fs::read(&index_path).map_err(|e| {
            SearchError::IndexUnavailable(format!("cannot read {}: {}", index_path.display(), e))
        })?;

        let index = Self::from_parts(dir.to_path_buf(), manifest, bytes)?;
        log::info!(
            "opened index {} ({} documents, {} fields, {} bytes)",
            dir.display(),
            index.manifest.doc_count,
            index.manifest.fields.len(),
            index.file.len()
        );
        Ok(index)
    }

    /// Build from a manifest and raw `index.isx` bytes.
    pub fn from_bytes(manifest: Manifest, bytes: Vec<u8>) -> Result<Self> {
        Self::from_parts(PathBuf::from("<memory>"), manifest, bytes)
    }

    fn from_parts(path: PathBuf, manifest: Manifest, bytes: Vec<u8>) -> Result<Self> {
        let file = IndexFile::from_bytes(bytes).map_err(|e| {
            SearchError::IndexUnavailable(format!("corrupt index {}: {}", path.display(), e))
        })?;

        if manifest.doc_count != file.doc_count() {
            return Err(SearchError::IndexUnavailable(format!(
                "manifest says {} documents, index file has {}",
                manifest.doc_count,
                file.doc_count()
            )));
        }
        if manifest.fields != file.fields() {
            return Err(SearchError::IndexUnavailable(
                "manifest fields do not match index file".into(),
            ));
        }

        Ok(Self {
            path,
            manifest,
            file,
        })
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn corrupt(&self, err: io::Error) -> SearchError {
        SearchError::IndexUnavailable(format!("corrupt index {}: {}", self.path.display(), err))
    }

    fn check_doc(&self, doc: DocId) -> Result<()> {
        if doc < self.file.doc_count() {
            Ok(())
        } else {
            Err(SearchError::InvalidArgument(format!(
                "doc id {} out of range (doc count {})",
                doc,
                self.file.doc_count()
            )))
        }
    }
}

impl Drop for DiskIndex {
    fn drop(&mut self) {
        log::debug!("closed index {}", self.path.display());
    }
}

impl IndexReader for DiskIndex {
    fn total_document_count(&self) -> u32 {
        self.file.doc_count()
    }

    fn document_frequency(&self, field: &str, term: &str) -> Result<u32> {
        Ok(self.file.lookup(field, term).map_or(0, |info| info.doc_freq))
    }

    fn postings<'a>(&'a self, field: &str, term: &str) -> Result<Postings<'a>> {
        let Some(info) = self.file.lookup(field, term) else {
            return Ok(Box::new(std::iter::empty()));
        };
        let decoder = self.file.postings(info).map_err(|e| self.corrupt(e))?;
        Ok(Box::new(decoder.map(move |r| r.map_err(|e| self.corrupt(e)))))
    }

    fn terms_with_prefix(&self, field: &str, prefix: &str) -> Result<Vec<String>> {
        Ok(self.file.terms_with_prefix(field, prefix))
    }

    fn field_length(&self, doc: DocId, field: &str) -> Result<u32> {
        self.check_doc(doc)?;
        match self.file.field_ordinal(field) {
            Some(ord) => self.file.field_length(ord, doc).map_err(|e| self.corrupt(e)),
            None => Ok(0),
        }
    }

    fn fetch_document(&self, doc: DocId) -> Result<StoredDocument> {
        self.check_doc(doc)?;
        self.file.document(doc).map_err(|e| self.corrupt(e))
    }

    fn fields(&self) -> Vec<String> {
        self.file.fields().to_vec()
    }

    fn analyzer_config(&self) -> &AnalyzerConfig {
        &self.manifest.analyzer
    }
}
