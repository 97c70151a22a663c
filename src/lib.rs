// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query-language search over an immutable inverted index.
//!
//! Give it an index directory and a query like `text:quick AND -dog*`; get
//! back the total number of matching documents, the time it took, and the
//! best few hits with their stored fields.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐   ┌────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  query     │──▶│  search    │──▶│  collector   │──▶│ SearchResult │
//! │ (parser,   │   │ (scorer    │   │ (top-K heap, │   │ (total, time,│
//! │  Query)    │   │  tree)     │   │  total)      │   │  hits)       │
//! └────────────┘   └────────────┘   └──────────────┘   └──────────────┘
//!       │                │
//!       ▼                ▼
//! ┌────────────┐   ┌─────────────────────────────────┐
//! │  analysis  │   │  index (IndexReader)            │
//! │ (tokens)   │   │  MemoryIndex | DiskIndex        │
//! └────────────┘   │        └── binary (index.isx)   │
//!                  └─────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use indexsearch::config::SearchConfig;
//! use indexsearch::index::IndexBuilder;
//! use indexsearch::search::Searcher;
//! use std::sync::Arc;
//!
//! let mut builder = IndexBuilder::default();
//! builder
//!     .add_texts("text", &["the quick brown fox", "the lazy dog", "quick dogs run"])
//!     .unwrap();
//! let searcher = Searcher::new(Arc::new(builder.build()));
//!
//! let config = SearchConfig { default_field: "text".into(), ..Default::default() };
//! let result = searcher.search_str("quick AND -dog*", &config).unwrap();
//! assert_eq!(result.total_match_count, 1);
//! assert_eq!(result.hits[0].doc_id, 0);
//! ```

pub mod analysis;
pub mod binary;
pub mod config;
pub mod error;
pub mod index;
pub mod query;
pub mod scoring;
pub mod search;
pub mod testing;

pub use config::{ParserOptions, SearchConfig};
pub use error::{Result, SearchError};
pub use index::{DiskIndex, DocId, IndexBuilder, IndexReader, MemoryIndex, StoredDocument};
pub use query::{parse_query, BooleanClause, Occur, Query, QueryParser};
pub use search::{search, search_batch, ScoredDocument, SearchResult, Searcher};
