//! A written and reopened index answers exactly like the in-memory one.

use crate::common::*;
use indexsearch::analysis::{AnalyzerConfig, StopWords};
use indexsearch::index::{DiskIndex, IndexBuilder, IndexReader, Manifest};

const QUERIES: [&str; 8] = [
    "alpha",
    "alpha beta",
    "alpha AND beta",
    "+gamma -delta",
    "eps*",
    "\"alpha beta\"",
    "\"alpha gamma\"~2",
    "(pi OR rho) AND -sigma",
];

#[test]
fn same_results_from_memory_and_disk() {
    let corpus = synthetic_corpus(150, 9, 3);
    let memory = text_index(&corpus);
    let dir = tempfile::tempdir().unwrap();
    let on_disk = disk_searcher(&memory, dir.path());
    let in_memory = memory_searcher(memory);

    let mut config = text_config();
    config.max_results = 25;
    for query in QUERIES {
        let a = run_with(&in_memory, query, &config);
        let b = run_with(&on_disk, query, &config);
        assert_eq!(a.hits, b.hits, "query {}", query);
        assert_eq!(a.total_match_count, b.total_match_count, "query {}", query);
        assert_eq!(in_memory.documents(&a).unwrap(), on_disk.documents(&b).unwrap());
    }
}

#[test]
fn manifest_records_the_analyzer() {
    let analyzer = AnalyzerConfig {
        stop_words: StopWords::Custom(vec!["the".into()]),
        stemming: true,
        ..Default::default()
    };
    let dir = tempfile::tempdir().unwrap();
    text_index_with(&THREE_DOCS, analyzer.clone())
        .write_to_dir(dir.path())
        .unwrap();

    let manifest = Manifest::load(dir.path()).unwrap();
    assert_eq!(manifest.analyzer, analyzer);
    assert_eq!(manifest.doc_count, 3);
    assert_eq!(manifest.fields, vec![TEXT_FIELD.to_string()]);

    // Query text goes through the same analyzer: "dog" stems to match "dogs".
    let searcher = indexsearch::Searcher::open(dir.path()).unwrap();
    assert_eq!(matching(&searcher, "dog"), vec![1, 2]);
    assert_eq!(matching(&searcher, "running"), vec![2]);
}

#[test]
fn multi_field_documents_survive_the_round_trip() {
    let mut builder = IndexBuilder::default();
    builder
        .add_document([("title", "Rust"), ("body", "systems programming language")])
        .unwrap();
    builder.add_document([("body", "no title here")]).unwrap();
    let memory = builder.build();

    let dir = tempfile::tempdir().unwrap();
    memory.write_to_dir(dir.path()).unwrap();
    let disk = DiskIndex::open(dir.path()).unwrap();

    assert_eq!(disk.fields(), vec!["body".to_string(), "title".to_string()]);
    assert_eq!(disk.fetch_document(0).unwrap(), memory.fetch_document(0).unwrap());
    assert_eq!(disk.fetch_document(1).unwrap().get("title"), None);
    assert_eq!(disk.field_length(1, "title").unwrap(), 0);
    assert_eq!(disk.field_length(0, "body").unwrap(), 3);
    assert_eq!(disk.document_frequency("title", "rust").unwrap(), 1);
}

#[test]
fn reopening_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    write_text_index(dir.path(), &THREE_DOCS);
    let first = indexsearch::Searcher::open(dir.path()).unwrap();
    let second = indexsearch::Searcher::open(dir.path()).unwrap();
    assert_eq!(run(&first, "quick").hits, run(&second, "quick").hits);
}

fn write_text_index(dir: &std::path::Path, texts: &[&str]) {
    indexsearch::testing::write_text_index(dir, texts).unwrap();
}
