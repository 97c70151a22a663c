//! Phrase queries: order, slop, and position gaps from removed words.

use crate::common::*;
use indexsearch::analysis::{AnalyzerConfig, StopWords};

const TEXTS: [&str; 4] = [
    "apple banana cherry",
    "banana apple cherry",
    "apple cherry banana",
    "apple x y z banana",
];

#[test]
fn order_matters() {
    let s = text_searcher(&TEXTS);
    assert_eq!(matching(&s, "\"apple banana\""), vec![0]);
    assert_eq!(matching(&s, "\"banana apple\""), vec![1]);
}

#[test]
fn slop_widens_the_window() {
    let s = text_searcher(&TEXTS);
    assert_eq!(matching(&s, "\"apple banana\"~1"), vec![0, 2]);
    assert_eq!(matching(&s, "\"apple banana\"~2"), vec![0, 2]);
    assert_eq!(matching(&s, "\"apple banana\"~3"), vec![0, 2, 3]);
}

#[test]
fn slop_never_reorders() {
    let s = text_searcher(&TEXTS);
    // doc 1 has the words swapped; no slop brings it back
    assert_eq!(matching(&s, "\"cherry apple\"~10"), Vec::<u32>::new());
}

#[test]
fn tighter_matches_rank_first() {
    let s = text_searcher(&TEXTS);
    let ids = hits(&s, "\"apple banana\"~3");
    assert_eq!(ids[0], 0);
    assert_eq!(*ids.last().unwrap(), 3);
}

#[test]
fn missing_word_matches_nothing() {
    let s = text_searcher(&TEXTS);
    let result = run(&s, "\"apple durian\"");
    assert_eq!(result.total_match_count, 0);
}

#[test]
fn one_word_phrase_is_a_term() {
    let s = text_searcher(&TEXTS);
    assert_eq!(matching(&s, "\"cherry\""), vec![0, 1, 2]);
}

#[test]
fn removed_stop_words_keep_their_slot() {
    let analyzer = AnalyzerConfig {
        stop_words: StopWords::Custom(vec!["of".into(), "the".into()]),
        ..Default::default()
    };
    let s = memory_searcher(text_index_with(
        &["war of the worlds", "war worlds", "war on worlds"],
        analyzer,
    ));
    // worlds is expected three positions after war
    assert_eq!(matching(&s, "\"war of the worlds\""), vec![0]);
    assert_eq!(matching(&s, "\"war worlds\""), vec![1]);
    assert_eq!(matching(&s, "\"war worlds\"~1"), vec![1, 2]);
}

#[test]
fn phrase_with_field_prefix() {
    let s = text_searcher(&TEXTS);
    assert_eq!(matching(&s, "text:\"apple cherry\""), vec![1, 2]);
    assert!(matching(&s, "title:\"apple cherry\"").is_empty());
}
