//! Many searches over one shared index.

use std::sync::Arc;
use std::thread;

use crate::common::*;
use indexsearch::index::IndexReader;
use indexsearch::query::{Occur, Query};
use indexsearch::search::{search, search_batch};
use indexsearch::{parse_query, ParserOptions};

fn queries() -> Vec<Query> {
    let options = ParserOptions {
        allow_leading_wildcard: true,
        default_occur: Occur::Should,
    };
    [
        "alpha",
        "beta OR gamma",
        "+delta -epsilon",
        "*a",
        "\"zeta eta\"~1",
        "(theta iota) AND kappa",
        "lambda^2 mu",
    ]
    .iter()
    .map(|q| parse_query(q, TEXT_FIELD, &options).unwrap())
    .collect()
}

#[test]
fn batch_equals_sequential() {
    let corpus = synthetic_corpus(250, 10, 11);
    let index = text_index(&corpus);
    let queries = queries();

    let batch = search_batch(&queries, &index, 15);
    assert_eq!(batch.len(), queries.len());
    for (query, result) in queries.iter().zip(batch) {
        let sequential = search(query, &index, 15).unwrap();
        let result = result.unwrap();
        assert_eq!(result.hits, sequential.hits, "query {}", query);
        assert_eq!(result.total_match_count, sequential.total_match_count);
    }
}

#[test]
fn batch_keeps_failures_separate() {
    let index = three_doc_index();
    let queries = vec![Query::term(TEXT_FIELD, "quick"), Query::wildcard(TEXT_FIELD, "dog*")];
    let results = search_batch(&queries, &index, 10);
    assert!(results.iter().all(Result::is_ok));

    let results = search_batch(&queries, &index, 0);
    assert!(results.iter().all(Result::is_err));
}

#[test]
fn threads_share_one_reader() {
    let corpus = synthetic_corpus(200, 8, 5);
    let reader: Arc<dyn IndexReader> = Arc::new(text_index(&corpus));
    let queries = Arc::new(queries());

    let expected: Vec<_> = queries
        .iter()
        .map(|q| search(q, reader.as_ref(), 10).unwrap().hits)
        .collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let reader = Arc::clone(&reader);
            let queries = Arc::clone(&queries);
            thread::spawn(move || {
                queries
                    .iter()
                    .map(|q| search(q, reader.as_ref(), 10).unwrap().hits)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
