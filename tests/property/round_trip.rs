//! Indexed text comes back out of term queries and the on-disk format.

use proptest::prelude::*;

use crate::common::*;
use crate::strategies::{contains, corpus, WORDS};
use indexsearch::index::{DiskIndex, IndexReader, Manifest, Posting};
use indexsearch::query::Query;
use indexsearch::search::search;

#[test]
fn three_doc_terms_match_their_documents() {
    let index = three_doc_index();
    for word in ["the", "quick", "brown", "fox", "lazy", "dog", "dogs", "run"] {
        let result = search(&Query::term(TEXT_FIELD, word), &index, 10).unwrap();
        let mut ids = result.doc_ids();
        ids.sort_unstable();
        let expected: Vec<u32> = (0u32..)
            .zip(THREE_DOCS)
            .filter(|(_, doc)| doc.split(' ').any(|w| w == word))
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, expected, "term {}", word);
    }
}

fn all_postings(reader: &dyn IndexReader, word: &str) -> Vec<Posting> {
    reader
        .postings(TEXT_FIELD, word)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn term_query_matches_exactly_containing_docs(corpus in corpus()) {
        let index = text_index(&corpus);
        for word in WORDS {
            let result = search(&Query::term(TEXT_FIELD, word), &index, corpus.len()).unwrap();
            let mut ids = result.doc_ids();
            ids.sort_unstable();
            let expected: Vec<u32> = (0u32..)
                .zip(&corpus)
                .filter(|(_, doc)| contains(doc, word))
                .map(|(id, _)| id)
                .collect();
            prop_assert_eq!(ids, expected);
        }
    }

    #[test]
    fn binary_format_preserves_the_index(corpus in corpus()) {
        let memory = text_index(&corpus);
        let bytes = memory.to_bytes().unwrap();
        let manifest = Manifest::new(
            memory.total_document_count(),
            memory.fields(),
            memory.analyzer_config().clone(),
        );
        let disk = DiskIndex::from_bytes(manifest, bytes).unwrap();

        prop_assert_eq!(disk.total_document_count(), memory.total_document_count());
        prop_assert_eq!(disk.fields(), memory.fields());
        for word in WORDS {
            prop_assert_eq!(
                disk.document_frequency(TEXT_FIELD, word).unwrap(),
                memory.document_frequency(TEXT_FIELD, word).unwrap()
            );
            prop_assert_eq!(all_postings(&disk, word), all_postings(&memory, word));
        }
        prop_assert_eq!(
            disk.terms_with_prefix(TEXT_FIELD, "g").unwrap(),
            memory.terms_with_prefix(TEXT_FIELD, "g").unwrap()
        );
        for doc in 0..memory.total_document_count() {
            prop_assert_eq!(
                disk.field_length(doc, TEXT_FIELD).unwrap(),
                memory.field_length(doc, TEXT_FIELD).unwrap()
            );
            prop_assert_eq!(disk.fetch_document(doc).unwrap(), memory.fetch_document(doc).unwrap());
        }
    }
}
