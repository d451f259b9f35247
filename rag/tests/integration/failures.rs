use super::{fixture, rag_builtin};
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs::read_to_string;

#[test]
fn missing_directory_fails() {
    let tempdir = tempfile::tempdir().unwrap();

    rag_builtin()
        .args(["foo", "bar"])
        .arg(tempdir.path().join("missing"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not read directory"));
}

#[test]
fn empty_query_fails() {
    let tempdir = fixture(&[("a.txt", "foo\n")]);

    rag_builtin()
        .args(["", "bar"])
        .arg(tempdir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("the query is empty"));
}

#[test]
fn invalid_pattern_fails_the_builtin_search() {
    let tempdir = fixture(&[("a.txt", "foo\n")]);

    rag_builtin()
        .args(["(", "bar"])
        .arg(tempdir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid pattern"));

    assert_eq!("foo\n", read_to_string(tempdir.path().join("a.txt")).unwrap());
}

#[test]
fn missing_replacement_is_a_usage_error() {
    cargo_bin_cmd!("rag")
        .arg("foo")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("<REPLACEMENT>"));
}

#[test]
fn invalid_environment_setting_fails() {
    let tempdir = fixture(&[("a.txt", "foo\n")]);

    cargo_bin_cmd!("rag")
        .env("RAG_TRANSFORM", "perl")
        .args(["--search-tool", "builtin", "foo", "bar"])
        .arg(tempdir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid value for `RAG_TRANSFORM`"));
}

#[test]
fn environment_settings_are_used() {
    let tempdir = fixture(&[("a.txt", "foo\n")]);

    cargo_bin_cmd!("rag")
        .env("RAG_SEARCH_TOOL", "builtin")
        .env("RAG_TRANSFORM", "builtin")
        .env("RAG_DIFF", "builtin")
        .args(["foo", "bar"])
        .arg(tempdir.path())
        .write_stdin("y\n")
        .assert()
        .success();

    assert_eq!("bar\n", read_to_string(tempdir.path().join("a.txt")).unwrap());
}
