//! Result order: score descending, doc id ascending on ties.

use crate::common::*;

#[test]
fn term_frequency_raises_score() {
    let s = text_searcher(&["fox hen owl", "fox fox owl", "fox hen fox"]);
    let result = run(&s, "fox");
    // doc 0 has one fox; 1 and 2 have two and tie on everything else
    assert_eq!(result.doc_ids(), vec![1, 2, 0]);
    assert_eq!(result.hits[0].score, result.hits[1].score);
    assert!(result.hits[1].score > result.hits[2].score);
}

#[test]
fn shorter_fields_rank_higher() {
    let s = text_searcher(&["fox and many other words here", "fox"]);
    assert_eq!(hits(&s, "fox"), vec![1, 0]);
}

#[test]
fn rare_terms_weigh_more() {
    let s = text_searcher(&["common rare", "common other", "common words"]);
    // doc 0 matches both; the rare term dominates
    let result = run(&s, "common rare");
    assert_eq!(result.doc_ids()[0], 0);
    let s = text_searcher(&["common x", "rare x", "common y", "common z"]);
    assert_eq!(hits(&s, "common rare")[0], 1);
}

#[test]
fn equal_scores_order_by_doc_id() {
    let texts = vec!["same text"; 12];
    let s = text_searcher(&texts);
    let result = run(&s, "same");
    assert_eq!(result.total_match_count, 12);
    assert_eq!(result.doc_ids(), (0..10).collect::<Vec<u32>>());
}

#[test]
fn boost_reorders() {
    let s = text_searcher(&["alpha", "beta"]);
    assert_eq!(hits(&s, "alpha beta^5"), vec![1, 0]);
    assert_eq!(hits(&s, "alpha^5 beta"), vec![0, 1]);
}

#[test]
fn scores_descend() {
    let corpus = synthetic_corpus(200, 12, 42);
    let refs: Vec<&str> = corpus.iter().map(String::as_str).collect();
    let s = text_searcher(&refs);
    let mut config = text_config();
    config.max_results = 50;
    let result = run_with(&s, "alpha beta* \"gamma delta\"~2", &config);
    assert!(result.hits.len() <= 50);
    for pair in result.hits.windows(2) {
        assert!(
            pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score && pair[0].doc_id < pair[1].doc_id)
        );
    }
}
