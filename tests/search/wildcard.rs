//! Wildcard expansion over the term dictionary.

use crate::common::*;
use indexsearch::error::SearchError;

const TEXTS: [&str; 5] = ["dog", "dogs", "dig", "digging dogma", "cat"];

#[test]
fn trailing_star() {
    let s = text_searcher(&TEXTS);
    assert_eq!(matching(&s, "dog*"), vec![0, 1, 3]);
    assert_eq!(matching(&s, "di*"), vec![2, 3]);
}

#[test]
fn single_character() {
    let s = text_searcher(&TEXTS);
    assert_eq!(matching(&s, "d?g"), vec![0, 2]);
    assert_eq!(matching(&s, "dog?"), vec![1]);
}

#[test]
fn inner_star() {
    let s = text_searcher(&TEXTS);
    assert_eq!(matching(&s, "d*g"), vec![0, 2, 3]);
    assert_eq!(matching(&s, "d*g*"), vec![0, 1, 2, 3]);
}

#[test]
fn pattern_is_case_insensitive_against_lowercased_terms() {
    let s = text_searcher(&TEXTS);
    assert_eq!(matching(&s, "DOG*"), vec![0, 1, 3]);
}

#[test]
fn no_expansion_matches_nothing() {
    let s = text_searcher(&TEXTS);
    assert_eq!(run(&s, "zebra*").total_match_count, 0);
}

#[test]
fn leading_wildcard_needs_permission() {
    let s = text_searcher(&TEXTS);
    let err = s.search_str("*at", &text_config()).unwrap_err();
    assert!(matches!(err, SearchError::Syntax { .. }));

    let mut config = text_config();
    config.parser.allow_leading_wildcard = true;
    assert_eq!(run_with(&s, "*at", &config).doc_ids(), vec![4]);
    let mut ids = run_with(&s, "?ig*", &config).doc_ids();
    ids.sort_unstable();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn document_matching_several_expansions_counts_once() {
    let s = text_searcher(&["dog dogs dogma", "dog"]);
    let result = run(&s, "dog*");
    assert_eq!(result.total_match_count, 2);
    assert_eq!(result.hits.len(), 2);
    // more matching terms, higher score
    assert_eq!(result.doc_ids(), vec![0, 1]);
}

#[test]
fn excluded_wildcard() {
    let s = text_searcher(&TEXTS);
    assert_eq!(matching(&s, "d* -dog*"), vec![2]);
}
