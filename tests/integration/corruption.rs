//! Damaged or missing index files are reported, never searched.

use std::fs;
use std::path::Path;

use crate::common::*;
use indexsearch::error::SearchError;
use indexsearch::index::{DiskIndex, INDEX_FILE_NAME, MANIFEST_FILE_NAME};

fn written_index() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    three_doc_index().write_to_dir(dir.path()).unwrap();
    dir
}

fn assert_unavailable(dir: &Path) {
    match DiskIndex::open(dir) {
        Err(SearchError::IndexUnavailable(_)) => {}
        Err(other) => panic!("expected IndexUnavailable, got {:?}", other),
        Ok(_) => panic!("corrupt index opened"),
    }
}

#[test]
fn flipped_bytes_are_detected() {
    let dir = written_index();
    let path = dir.path().join(INDEX_FILE_NAME);
    let original = fs::read(&path).unwrap();

    for offset in [0, 4, 12, original.len() / 2, original.len() - 9, original.len() - 1] {
        let mut bytes = original.clone();
        bytes[offset] ^= 0x5A;
        fs::write(&path, &bytes).unwrap();
        assert_unavailable(dir.path());
    }

    fs::write(&path, &original).unwrap();
    assert!(DiskIndex::open(dir.path()).is_ok());
}

#[test]
fn truncated_file_is_detected() {
    let dir = written_index();
    let path = dir.path().join(INDEX_FILE_NAME);
    let original = fs::read(&path).unwrap();

    for len in [0, 3, 20, original.len() / 2, original.len() - 1] {
        fs::write(&path, &original[..len]).unwrap();
        assert_unavailable(dir.path());
    }
}

#[test]
fn trailing_garbage_is_detected() {
    let dir = written_index();
    let path = dir.path().join(INDEX_FILE_NAME);
    let mut bytes = fs::read(&path).unwrap();
    bytes.extend_from_slice(b"junk");
    fs::write(&path, &bytes).unwrap();
    assert_unavailable(dir.path());
}

#[test]
fn missing_pieces() {
    let dir = written_index();
    fs::remove_file(dir.path().join(MANIFEST_FILE_NAME)).unwrap();
    assert_unavailable(dir.path());

    let dir = written_index();
    fs::remove_file(dir.path().join(INDEX_FILE_NAME)).unwrap();
    assert_unavailable(dir.path());

    let dir = tempfile::tempdir().unwrap();
    assert_unavailable(&dir.path().join("nope"));
}

#[test]
fn manifest_from_another_index() {
    let a = written_index();
    let b = tempfile::tempdir().unwrap();
    text_index(&["one document only"]).write_to_dir(b.path()).unwrap();
    fs::copy(b.path().join(MANIFEST_FILE_NAME), a.path().join(MANIFEST_FILE_NAME)).unwrap();
    assert_unavailable(a.path());
}

#[test]
fn searcher_open_reports_unavailable() {
    let dir = written_index();
    fs::write(dir.path().join(INDEX_FILE_NAME), b"not an index").unwrap();
    let err = indexsearch::Searcher::open(dir.path()).unwrap_err();
    assert!(matches!(err, SearchError::IndexUnavailable(_)));
    assert_eq!(err.exit_code(), 4);
}
