//! Boolean operators, modifiers and the default operator.

use crate::common::*;
use indexsearch::index::IndexBuilder;
use indexsearch::query::Occur;

const FRUIT: [&str; 5] = [
    "apple banana cherry",
    "apple banana",
    "banana cherry",
    "cherry date",
    "apple date elderberry",
];

fn fruit() -> indexsearch::search::Searcher {
    text_searcher(&FRUIT)
}

#[test]
fn implicit_operator_is_or() {
    assert_eq!(matching(&fruit(), "apple banana"), vec![0, 1, 2, 4]);
}

#[test]
fn and_or_keywords_and_symbols() {
    let s = fruit();
    assert_eq!(matching(&s, "apple AND banana"), vec![0, 1]);
    assert_eq!(matching(&s, "apple && banana"), vec![0, 1]);
    assert_eq!(matching(&s, "apple OR date"), vec![0, 1, 3, 4]);
    assert_eq!(matching(&s, "apple || date"), vec![0, 1, 3, 4]);
}

#[test]
fn required_and_prohibited_modifiers() {
    let s = fruit();
    assert_eq!(matching(&s, "+apple -date"), vec![0, 1]);
    assert_eq!(matching(&s, "+apple -banana"), vec![4]);
    assert_eq!(matching(&s, "apple !banana"), vec![4]);
    assert_eq!(matching(&s, "NOT date apple"), vec![0, 1]);
}

#[test]
fn optional_clauses_do_not_widen_required_ones() {
    let s = fruit();
    // cherry only adds score next to a required clause
    assert_eq!(matching(&s, "+apple cherry"), vec![0, 1, 4]);
}

#[test]
fn only_prohibited_matches_nothing() {
    let result = run(&fruit(), "-apple");
    assert_eq!(result.total_match_count, 0);
    assert!(result.hits.is_empty());
}

#[test]
fn groups() {
    let s = fruit();
    assert_eq!(matching(&s, "(apple OR cherry) AND -banana"), vec![3, 4]);
    assert_eq!(matching(&s, "text:(apple AND date)"), vec![4]);
    assert_eq!(matching(&s, "((apple))"), vec![0, 1, 4]);
}

#[test]
fn require_all_default_operator() {
    let s = fruit();
    let mut config = text_config();
    config.parser.default_occur = Occur::Must;

    assert_eq!(run_with(&s, "apple banana", &config).total_match_count, 2);
    // OR demotes both sides back to optional
    let mut ids = run_with(&s, "apple OR date", &config).doc_ids();
    ids.sort_unstable();
    assert_eq!(ids, vec![0, 1, 3, 4]);
    assert_eq!(run_with(&s, "apple date -elderberry", &config).total_match_count, 0);
}

#[test]
fn unknown_term_in_conjunction_matches_nothing() {
    assert!(matching(&fruit(), "apple AND fig").is_empty());
    assert_eq!(matching(&fruit(), "apple OR fig"), vec![0, 1, 4]);
}

#[test]
fn field_prefixes_select_fields() {
    let mut builder = IndexBuilder::default();
    builder
        .add_document([("title", "apple pie"), ("text", "banana bread")])
        .unwrap();
    builder
        .add_document([("title", "banana split"), ("text", "apple crumble")])
        .unwrap();
    let s = memory_searcher(builder.build());

    assert_eq!(matching(&s, "title:apple"), vec![0]);
    assert_eq!(matching(&s, "apple"), vec![1]);
    assert_eq!(matching(&s, "title:apple OR title:banana"), vec![0, 1]);
    assert_eq!(matching(&s, "title:banana AND text:apple"), vec![1]);
    assert!(matching(&s, "body:apple").is_empty());
}
