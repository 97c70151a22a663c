//! The `indexsearch` binary: output format and exit codes.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use crate::common::*;

fn indexsearch(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_indexsearch"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("run indexsearch")
}

fn index_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    three_doc_index().write_to_dir(dir.path()).unwrap();
    dir
}

fn path(p: &Path) -> &str {
    p.to_str().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn prints_summary_and_documents() {
    let dir = index_dir();
    let output = indexsearch(&[path(dir.path()), "text:quick AND -dog*", "-d", "text"]);
    assert!(output.status.success(), "{:?}", output);

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("Found 1 documents in "));
    assert!(lines[0].ends_with(" that matched query 'text:quick AND -dog*'"));
    assert_eq!(lines[1], "");
    assert_eq!(lines[2], "Document<text:the quick brown fox>");
    assert_eq!(lines.len(), 3);
}

#[test]
fn field_prefix_covers_one_clause() {
    let dir = index_dir();
    // Without -d the exclusion searches the default field, which this index lacks.
    let output = indexsearch(&[path(dir.path()), "text:quick AND -dog*"]);
    assert!(output.status.success(), "{:?}", output);
    let text = stdout(&output);
    assert!(text.starts_with("Found 2 documents"));
    assert!(text.contains("Document<text:quick dogs run>"));

    let output = indexsearch(&[path(dir.path()), "text:quick AND -text:dog*"]);
    assert!(stdout(&output).starts_with("Found 1 documents"));
}

#[test]
fn flags_shape_the_search() {
    let dir = index_dir();
    let output = indexsearch(&[path(dir.path()), "quick OR lazy", "-d", "text", "-n", "2"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("Found 3 documents"));
    assert_eq!(text.lines().filter(|l| l.starts_with("Document<")).count(), 2);

    let output = indexsearch(&[path(dir.path()), "quick lazy", "-d", "text", "--require-all"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Found 0 documents"));
}

#[test]
fn query_from_file() {
    let dir = index_dir();
    let query_path = dir.path().join("query.txt");
    fs::write(&query_path, "\"lazy dog\"\n").unwrap();
    let output = indexsearch(&[path(dir.path()), "-f", path(&query_path), "-d", "text"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Document<text:the lazy dog>"));
}

#[test]
fn leading_wildcards_are_on_by_default() {
    let dir = index_dir();
    let output = indexsearch(&[path(dir.path()), "text:*ick"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Found 2 documents"));

    let output = indexsearch(&[path(dir.path()), "text:*ick", "--no-leading-wildcard"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn exit_codes() {
    let dir = index_dir();
    let index = path(dir.path());

    let syntax = indexsearch(&[index, "(quick"]);
    assert_eq!(syntax.status.code(), Some(3));
    assert!(syntax.stdout.is_empty());
    assert!(!syntax.stderr.is_empty());

    let zero_limit = indexsearch(&[index, "quick", "-n", "0"]);
    assert_eq!(zero_limit.status.code(), Some(2));

    let no_query = indexsearch(&[index]);
    assert_eq!(no_query.status.code(), Some(2));

    let bad_query_missing_index = indexsearch(&["/no/such/index", "(quick"]);
    assert_eq!(bad_query_missing_index.status.code(), Some(3));
    assert!(bad_query_missing_index.stdout.is_empty());

    let missing_index = indexsearch(&["/no/such/index", "quick"]);
    assert_eq!(missing_index.status.code(), Some(4));
    assert!(missing_index.stdout.is_empty());

    let missing_query_file = indexsearch(&[index, "-f", "/no/such/query.txt"]);
    assert_eq!(missing_query_file.status.code(), Some(5));
}

#[test]
fn config_file_and_flag_precedence() {
    let dir = index_dir();
    let config_path = dir.path().join("search.json");
    fs::write(
        &config_path,
        r#"{"default_field": "text", "max_results": 1, "parser": {"default_occur": "must"}}"#,
    )
    .unwrap();
    let config = path(&config_path);

    let output = indexsearch(&[path(dir.path()), "quick the", "--config", config]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("Found 1 documents"));

    let output = indexsearch(&[path(dir.path()), "quick", "--config", config, "-n", "5"]);
    let text = stdout(&output);
    assert_eq!(text.lines().filter(|l| l.starts_with("Document<")).count(), 2);
}
