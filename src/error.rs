// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for indexsearch.
//!
//! Three things can go wrong before a search produces results: the user typed
//! a malformed query, the caller passed a bad argument, or the index can't be
//! read. An empty result set is not one of them.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Malformed query expression. `column` is 1-based.
    #[error("Syntax error at column {column}: {message}")]
    Syntax { message: String, column: usize },

    /// Missing, unreadable or corrupt index. Fatal for the session.
    #[error("Index unavailable: {0}")]
    IndexUnavailable(String),

    /// Bad caller input, detected before any index is opened.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SearchError {
    pub fn syntax(message: impl Into<String>, column: usize) -> Self {
        Self::Syntax {
            message: message.into(),
            column,
        }
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::IndexUnavailable(message.into())
    }

    /// Process exit status for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            SearchError::InvalidArgument(_) => 2,
            SearchError::Syntax { .. } => 3,
            SearchError::IndexUnavailable(_) => 4,
        }
    }
}

impl From<io::Error> for SearchError {
    fn from(err: io::Error) -> Self {
        SearchError::IndexUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
