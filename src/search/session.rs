// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One search: evaluate, select the top hits, time it.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::Analyzer;
use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::index::{DiskIndex, IndexReader, Manifest, StoredDocument};
use crate::query::{Query, QueryParser};

use super::collector::select;
use super::evaluator::evaluate;
use super::ScoredDocument;

/// Outcome of one search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Every matching document, not just the returned ones.
    pub total_match_count: u64,
    /// Evaluation and selection time. Excludes parsing and document fetches.
    pub elapsed: Duration,
    /// At most `max_results` hits, best first.
    pub hits: Vec<ScoredDocument>,
}

impl SearchResult {
    pub fn doc_ids(&self) -> Vec<u32> {
        self.hits.iter().map(|h| h.doc_id).collect()
    }
}

/// Run `query` against `reader` and keep the best `max_results` hits.
pub fn search(query: &Query, reader: &dyn IndexReader, max_results: usize) -> Result<SearchResult> {
    if max_results == 0 {
        return Err(SearchError::InvalidArgument(
            "max results must be greater than zero".into(),
        ));
    }

    let start = Instant::now();
    let (hits, total_match_count) = select(evaluate(query, reader)?, max_results)?;
    let elapsed = start.elapsed();

    log::info!(
        "query {} matched {} documents in {:?}",
        query,
        total_match_count,
        elapsed
    );
    Ok(SearchResult {
        total_match_count,
        elapsed,
        hits,
    })
}

/// Run independent queries over one shared reader.
///
/// Results line up with `queries`. Each query fails or succeeds on its own.
pub fn search_batch(
    queries: &[Query],
    reader: &dyn IndexReader,
    max_results: usize,
) -> Vec<Result<SearchResult>> {
    #[cfg(feature = "parallel")]
    {
        queries
            .par_iter()
            .map(|q| search(q, reader, max_results))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        queries.iter().map(|q| search(q, reader, max_results)).collect()
    }
}

/// Shared handle for searching one index.
///
/// Cheap to clone; clones share the reader.
#[derive(Clone)]
pub struct Searcher {
    reader: Arc<dyn IndexReader>,
    analyzer: Analyzer,
}

impl Searcher {
    pub fn new(reader: Arc<dyn IndexReader>) -> Self {
        let analyzer = Analyzer::new(reader.analyzer_config().clone());
        Self { reader, analyzer }
    }

    /// Open an index directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Arc::new(DiskIndex::open(dir)?)))
    }

    /// Parse `input`, then open the index at `dir` to run it against.
    ///
    /// Grammar errors are reported before anything under `dir` is read. The
    /// manifest is read next, since its analyzer settings shape the query,
    /// and the index file is only read once the query is known to be valid.
    pub fn open_with_query(
        dir: impl AsRef<Path>,
        input: &str,
        config: &SearchConfig,
    ) -> Result<(Self, Query)> {
        let dir = dir.as_ref();
        config.validate()?;

        // The default analyzer keeps every token any other analyzer keeps,
        // so a query it rejects is rejected under every index.
        QueryParser::new(config.default_field.clone(), config.parser).parse(input)?;

        let manifest = Manifest::load(dir)?;
        let analyzer = Analyzer::new(manifest.analyzer.clone());
        let query = QueryParser::new(config.default_field.clone(), config.parser)
            .with_analyzer(analyzer.clone())
            .parse(input)?;
        log::debug!("parsed '{}' as {}", input, query);

        let reader: Arc<dyn IndexReader> = Arc::new(DiskIndex::open_with_manifest(dir, manifest)?);
        Ok((Self { reader, analyzer }, query))
    }

    pub fn reader(&self) -> &dyn IndexReader {
        self.reader.as_ref()
    }

    /// A parser that analyzes query text the way the index analyzed documents.
    pub fn parser(&self, config: &SearchConfig) -> QueryParser {
        QueryParser::new(config.default_field.clone(), config.parser)
            .with_analyzer(self.analyzer.clone())
    }

    pub fn parse(&self, input: &str, config: &SearchConfig) -> Result<Query> {
        config.validate()?;
        let query = self.parser(config).parse(input)?;
        log::debug!("parsed '{}' as {}", input, query);
        Ok(query)
    }

    /// Parse and run a query string.
    pub fn search_str(&self, input: &str, config: &SearchConfig) -> Result<SearchResult> {
        let query = self.parse(input, config)?;
        self.search(&query, config.max_results)
    }

    pub fn search(&self, query: &Query, max_results: usize) -> Result<SearchResult> {
        search(query, self.reader(), max_results)
    }

    pub fn search_batch(&self, queries: &[Query], max_results: usize) -> Vec<Result<SearchResult>> {
        search_batch(queries, self.reader(), max_results)
    }

    /// Stored fields of every hit, in hit order.
    pub fn documents(&self, result: &SearchResult) -> Result<Vec<StoredDocument>> {
        result
            .hits
            .iter()
            .map(|hit| self.reader.fetch_document(hit.doc_id))
            .collect()
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("documents", &self.reader.total_document_count())
            .field("fields", &self.reader.fields())
            .finish()
    }
}
