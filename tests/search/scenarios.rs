//! End-to-end queries over the three-document fixture.
//!
//! Doc ids are 0-based: 0 "the quick brown fox", 1 "the lazy dog",
//! 2 "quick dogs run".

use crate::common::*;
use indexsearch::config::SearchConfig;

#[test]
fn required_term_with_excluded_wildcard() {
    let searcher = three_doc_searcher();
    let result = run(&searcher, "text:quick AND -dog*");
    assert_eq!(result.total_match_count, 1);
    assert_eq!(result.doc_ids(), vec![0]);
}

#[test]
fn exact_phrase() {
    let searcher = three_doc_searcher();
    let result = run(&searcher, "\"lazy dog\"");
    assert_eq!(result.total_match_count, 1);
    assert_eq!(result.doc_ids(), vec![1]);
}

#[test]
fn same_scenarios_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let searcher = disk_searcher(&three_doc_index(), dir.path());
    assert_eq!(hits(&searcher, "text:quick AND -dog*"), vec![0]);
    assert_eq!(hits(&searcher, "\"lazy dog\""), vec![1]);
}

#[test]
fn single_term() {
    let searcher = three_doc_searcher();
    assert_eq!(matching(&searcher, "quick"), vec![0, 2]);
    assert_eq!(matching(&searcher, "the"), vec![0, 1]);
    // terms are exact without stemming
    assert_eq!(matching(&searcher, "dog"), vec![1]);
    assert_eq!(matching(&searcher, "dogs"), vec![2]);
}

#[test]
fn query_text_is_analyzed() {
    let searcher = three_doc_searcher();
    assert_eq!(matching(&searcher, "QUICK"), vec![0, 2]);
    assert_eq!(matching(&searcher, "Lazy"), vec![1]);
}

#[test]
fn stored_fields_come_back_in_hit_order() {
    let searcher = three_doc_searcher();
    let result = run(&searcher, "quick");
    let docs = searcher.documents(&result).unwrap();
    let texts: Vec<&str> = docs.iter().map(|d| d[TEXT_FIELD].as_str()).collect();
    let expected: Vec<&str> = result.doc_ids().iter().map(|&id| THREE_DOCS[id as usize]).collect();
    assert_eq!(texts, expected);
}

#[test]
fn default_field_without_prefix() {
    let searcher = three_doc_searcher();
    // The stock default field does not exist in this index.
    let result = run_with(&searcher, "quick", &SearchConfig::default());
    assert_eq!(result.total_match_count, 0);
    assert!(result.hits.is_empty());
    // An explicit prefix still reaches the text field.
    let result = run_with(&searcher, "text:quick", &SearchConfig::default());
    assert_eq!(result.total_match_count, 2);
}
