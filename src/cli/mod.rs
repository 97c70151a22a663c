// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the indexsearch command-line interface.
//!
//! One command: open an index directory, run one query, print the hits.
//! Settings resolve in layers: built-in defaults, then an optional JSON
//! config file, then flags.

pub mod display;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use indexsearch::config::SearchConfig;
use indexsearch::error::SearchError;
use indexsearch::query::Occur;
use indexsearch::search::Searcher;

/// Exit status when the query file cannot be read.
pub const QUERY_FILE_EXIT: i32 = 5;

#[derive(Parser, Debug)]
#[command(
    name = "indexsearch",
    about = "Run a query-language search against a pre-built index",
    version
)]
pub struct Cli {
    /// Index directory (manifest.json + index.isx)
    pub index_dir: PathBuf,

    /// Query string, e.g. 'text:quick AND -dog*'
    pub query: Option<String>,

    /// Read the query from a file instead
    #[arg(short = 'f', long)]
    pub query_file: Option<PathBuf>,

    /// Field searched by clauses without a field prefix
    #[arg(short = 'd', long)]
    pub default_field: Option<String>,

    /// Maximum number of hits to print
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Clauses without an operator are required (AND) instead of optional (OR)
    #[arg(long)]
    pub require_all: bool,

    /// Reject queries that start a term with `*` or `?`
    #[arg(long)]
    pub no_leading_wildcard: bool,

    /// JSON search config; flags override it
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Defaults, then the config file, then flags.
    ///
    /// The command line accepts leading wildcards unless told otherwise.
    pub fn resolve_config(&self) -> Result<SearchConfig, SearchError> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::from_json_file(path)?,
            None => {
                let mut config = SearchConfig::default();
                config.parser.allow_leading_wildcard = true;
                config
            }
        };

        if let Some(field) = &self.default_field {
            config.default_field = field.clone();
        }
        if let Some(limit) = self.limit {
            config.max_results = limit;
        }
        if self.require_all {
            config.parser.default_occur = Occur::Must;
        }
        if self.no_leading_wildcard {
            config.parser.allow_leading_wildcard = false;
        }

        config.validate()?;
        Ok(config)
    }

    /// The query text, from the argument or the query file.
    pub fn read_query(&self) -> anyhow::Result<String> {
        match (&self.query, &self.query_file) {
            (Some(query), None) => Ok(query.clone()),
            (None, Some(path)) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("cannot read query file {}", path.display()))?;
                Ok(text.trim_end_matches(['\r', '\n']).to_string())
            }
            (Some(_), Some(_)) => Err(SearchError::InvalidArgument(
                "give either a query or --query-file, not both".into(),
            )
            .into()),
            (None, None) => Err(SearchError::InvalidArgument(
                "no query given (pass QUERY or --query-file)".into(),
            )
            .into()),
        }
    }
}

/// Run one search and print it. Nothing reaches stdout unless the whole
/// search succeeded.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.resolve_config()?;
    let query = cli.read_query()?;

    let (searcher, parsed) = Searcher::open_with_query(&cli.index_dir, &query, &config)?;
    let result = searcher.search(&parsed, config.max_results)?;
    let documents = searcher.documents(&result)?;

    let mut out = String::new();
    out.push_str(&display::summary_line(
        result.total_match_count,
        result.elapsed,
        &query,
    ));
    out.push_str("\n\n");
    for document in &documents {
        out.push_str(&display::document_line(document));
        out.push('\n');
    }
    print!("{}", out);
    Ok(())
}

/// Exit status for a failed run.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<SearchError>() {
        Some(e) => e.exit_code(),
        None => QUERY_FILE_EXIT,
    }
}
