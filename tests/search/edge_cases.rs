//! Malformed queries, empty results and limits.

use crate::common::*;
use indexsearch::analysis::{AnalyzerConfig, StopWords};
use indexsearch::error::SearchError;

fn syntax_column(query: &str) -> usize {
    match three_doc_searcher().search_str(query, &text_config()) {
        Err(SearchError::Syntax { column, .. }) => column,
        other => panic!("expected syntax error for {:?}, got {:?}", query, other),
    }
}

#[test]
fn empty_and_blank_queries_are_syntax_errors() {
    assert_eq!(syntax_column(""), 1);
    assert_eq!(syntax_column("   "), 1);
}

#[test]
fn malformed_queries_are_syntax_errors() {
    for query in [
        "(quick",
        "quick)",
        "\"lazy dog",
        "quick AND",
        "AND quick",
        "text:",
        "quick^",
        "quick~",
        "[a TO b]",
    ] {
        syntax_column(query);
    }
}

#[test]
fn unbalanced_parenthesis_column() {
    assert_eq!(syntax_column("(quick"), 1);
    assert_eq!(syntax_column("quick)"), 6);
}

#[test]
fn zero_matches_is_not_an_error() {
    let result = run(&three_doc_searcher(), "elephant");
    assert_eq!(result.total_match_count, 0);
    assert!(result.hits.is_empty());
}

#[test]
fn zero_limit_is_invalid_argument() {
    let mut config = text_config();
    config.max_results = 0;
    let err = three_doc_searcher().search_str("quick", &config).unwrap_err();
    assert!(matches!(err, SearchError::InvalidArgument(_)));
}

#[test]
fn limit_larger_than_matches() {
    let mut config = text_config();
    config.max_results = 1000;
    let result = run_with(&three_doc_searcher(), "quick OR lazy", &config);
    assert_eq!(result.hits.len(), 3);
    assert_eq!(result.total_match_count, 3);
}

#[test]
fn limit_one() {
    let mut config = text_config();
    config.max_results = 1;
    let result = run_with(&three_doc_searcher(), "the", &config);
    assert_eq!(result.hits.len(), 1);
    assert_eq!(result.total_match_count, 2);
}

#[test]
fn query_of_only_stop_words() {
    let analyzer = AnalyzerConfig {
        stop_words: StopWords::Custom(vec!["the".into()]),
        ..Default::default()
    };
    let s = memory_searcher(text_index_with(&THREE_DOCS, analyzer));
    let err = s.search_str("the", &text_config()).unwrap_err();
    assert!(matches!(err, SearchError::Syntax { .. }));
    // one surviving clause still searches
    assert_eq!(matching(&s, "the fox"), vec![0]);
}

#[test]
fn punctuation_inside_terms_splits_into_a_phrase() {
    let s = text_searcher(&["state-of-the-art design", "state of art"]);
    assert_eq!(matching(&s, "state-of-the-art"), vec![0]);
}

#[test]
fn empty_index() {
    let empty: [&str; 0] = [];
    let s = text_searcher(&empty);
    assert_eq!(run(&s, "anything").total_match_count, 0);
    assert_eq!(run(&s, "any*").total_match_count, 0);
}

#[test]
fn escaped_characters_are_literal() {
    let s = text_searcher(&["c plus plus", "c"]);
    // the escaped plus is analyzed away, leaving the term "c"
    assert_eq!(matching(&s, "c\\+\\+"), vec![0, 1]);
}
