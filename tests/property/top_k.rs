//! Top-K selection equals a full sort truncated to K.

use proptest::prelude::*;

use crate::common::*;
use crate::strategies::corpus;
use indexsearch::scoring::ranking::compare_scored;
use indexsearch::search::{evaluate, select, ScoredDocument, TopKSelector};
use indexsearch::query::Query;

/// Distinct doc ids with scores drawn from a tiny set, so ties are common.
fn scored_docs() -> impl Strategy<Value = Vec<ScoredDocument>> {
    prop::collection::vec(0u8..4, 0..60).prop_map(|scores| {
        scores
            .into_iter()
            .enumerate()
            .map(|(i, s)| ScoredDocument {
                doc_id: (i as u32) * 7 % 61,
                score: f64::from(s) * 0.5,
                seq: i as u64,
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn selection_equals_sorted_prefix(docs in scored_docs(), k in 1usize..20) {
        let (hits, total) = select(docs.iter().copied().map(Ok), k).unwrap();

        let mut expected = docs.clone();
        expected.sort_by(compare_scored);
        expected.truncate(k);

        prop_assert_eq!(total, docs.len() as u64);
        prop_assert_eq!(hits, expected);
    }

    #[test]
    fn arrival_order_does_not_matter(docs in scored_docs(), k in 1usize..20) {
        let (forward, _) = select(docs.iter().copied().map(Ok), k).unwrap();
        let (backward, _) = select(docs.iter().rev().copied().map(Ok), k).unwrap();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn push_selector_counts_everything(docs in scored_docs(), k in 1usize..20) {
        let mut selector = TopKSelector::new(k).unwrap();
        for doc in &docs {
            selector.collect(*doc);
        }
        prop_assert_eq!(selector.total_matched(), docs.len() as u64);
        let (hits, _) = selector.into_sorted();
        prop_assert_eq!(hits.len(), docs.len().min(k));
    }

    #[test]
    fn search_hits_are_prefix_of_full_evaluation(corpus in corpus(), k in 1usize..8) {
        let index = text_index(&corpus);
        let query = Query::wildcard(TEXT_FIELD, "g*");

        let mut all: Vec<ScoredDocument> = evaluate(&query, &index)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        all.sort_by(compare_scored);

        let result = indexsearch::search(&query, &index, k).unwrap();
        prop_assert_eq!(result.total_match_count, all.len() as u64);
        all.truncate(k);
        prop_assert_eq!(result.hits, all);
    }
}
