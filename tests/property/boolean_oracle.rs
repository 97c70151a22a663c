//! Boolean queries against a brute-force oracle.

use proptest::prelude::*;

use crate::common::*;
use crate::strategies::{clauses, contains, corpus};
use indexsearch::query::{BooleanClause, Occur, Query};
use indexsearch::search::search;

/// Must: all present. MustNot: none present. Should: at least one present,
/// unless some clause is required.
fn oracle(corpus: &[String], clauses: &[(&str, Occur)]) -> Vec<u32> {
    let has_must = clauses.iter().any(|(_, o)| *o == Occur::Must);
    let has_should = clauses.iter().any(|(_, o)| *o == Occur::Should);

    (0u32..)
        .zip(corpus)
        .filter(|(_, doc)| {
            let must_ok = clauses
                .iter()
                .filter(|(_, o)| *o == Occur::Must)
                .all(|(w, _)| contains(doc, w));
            let not_ok = clauses
                .iter()
                .filter(|(_, o)| *o == Occur::MustNot)
                .all(|(w, _)| !contains(doc, w));
            let should_ok = has_must
                || (has_should
                    && clauses
                        .iter()
                        .filter(|(_, o)| *o == Occur::Should)
                        .any(|(w, _)| contains(doc, w)));
            must_ok && not_ok && should_ok
        })
        .map(|(id, _)| id)
        .collect()
}

fn as_query(clauses: &[(&str, Occur)]) -> Query {
    Query::boolean(
        clauses
            .iter()
            .map(|(w, o)| BooleanClause::new(Query::term(TEXT_FIELD, *w), *o))
            .collect(),
    )
}

/// The same clauses written with `+` and `-` modifiers.
fn as_query_string(clauses: &[(&str, Occur)]) -> String {
    clauses
        .iter()
        .map(|(w, o)| match o {
            Occur::Must => format!("+{}", w),
            Occur::MustNot => format!("-{}", w),
            Occur::Should => (*w).to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn query_tree_matches_oracle(corpus in corpus(), clauses in clauses()) {
        let index = text_index(&corpus);
        let result = search(&as_query(&clauses), &index, corpus.len().max(1)).unwrap();
        let mut ids = result.doc_ids();
        ids.sort_unstable();
        let expected = oracle(&corpus, &clauses);
        prop_assert_eq!(result.total_match_count, expected.len() as u64);
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn parsed_modifiers_match_oracle(corpus in corpus(), clauses in clauses()) {
        let searcher = memory_searcher(text_index(&corpus));
        let mut config = text_config();
        config.max_results = corpus.len().max(1);
        let result = searcher.search_str(&as_query_string(&clauses), &config).unwrap();
        let mut ids = result.doc_ids();
        ids.sort_unstable();
        prop_assert_eq!(ids, oracle(&corpus, &clauses));
    }

    #[test]
    fn scores_are_positive_and_finite(corpus in corpus(), clauses in clauses()) {
        let index = text_index(&corpus);
        let result = search(&as_query(&clauses), &index, 100).unwrap();
        for hit in &result.hits {
            prop_assert!(hit.score.is_finite());
            prop_assert!(hit.score > 0.0);
        }
    }
}
