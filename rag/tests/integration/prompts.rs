use super::{file_names, fixture, rag_builtin};
use predicates::prelude::*;
use std::fs::read_to_string;

#[test]
fn accept_rewrites_file() {
    let tempdir = fixture(&[("a.txt", "foo baz foo\n")]);

    rag_builtin()
        .args(["foo", "bar"])
        .arg(tempdir.path())
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Matches in "))
        .stdout(predicate::str::contains("[-foo-]"))
        .stdout(predicate::str::contains("Write changes to "));

    assert_eq!(
        "bar baz bar\n",
        read_to_string(tempdir.path().join("a.txt")).unwrap()
    );
    assert_eq!(vec!["a.txt"], file_names(tempdir.path()));
}

#[test]
fn decline_leaves_file_untouched() {
    let tempdir = fixture(&[("a.txt", "foo baz foo\n")]);

    rag_builtin()
        .args(["foo", "bar"])
        .arg(tempdir.path())
        .write_stdin("n\n")
        .assert()
        .success();

    assert_eq!(
        "foo baz foo\n",
        read_to_string(tempdir.path().join("a.txt")).unwrap()
    );
    assert_eq!(vec!["a.txt"], file_names(tempdir.path()));
}

#[test]
fn each_file_gets_its_own_answer() {
    let tempdir = fixture(&[
        ("a.txt", "foo\n"),
        ("b.txt", "foo\n"),
        ("c.txt", "no match\n"),
    ]);

    rag_builtin()
        .args(["foo", "bar"])
        .arg(tempdir.path())
        .write_stdin("n\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("c.txt").not());

    assert_eq!("foo\n", read_to_string(tempdir.path().join("a.txt")).unwrap());
    assert_eq!("bar\n", read_to_string(tempdir.path().join("b.txt")).unwrap());
}

#[test]
fn no_candidates_means_no_prompts() {
    let tempdir = fixture(&[("a.txt", "nothing here\n")]);

    rag_builtin()
        .args(["foo", "bar"])
        .arg(tempdir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Write changes").not());
}

#[test]
fn quit_stops_with_status_2() {
    let tempdir = fixture(&[("a.txt", "foo\n"), ("b.txt", "foo\n")]);

    rag_builtin()
        .args(["foo", "bar"])
        .arg(tempdir.path())
        .write_stdin("q\ny\n")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("b.txt").not());

    assert_eq!("foo\n", read_to_string(tempdir.path().join("a.txt")).unwrap());
    assert_eq!("foo\n", read_to_string(tempdir.path().join("b.txt")).unwrap());
    assert_eq!(vec!["a.txt", "b.txt"], file_names(tempdir.path()));
}

#[test]
fn end_of_input_declines() {
    let tempdir = fixture(&[("a.txt", "foo\n")]);

    rag_builtin()
        .args(["foo", "bar"])
        .arg(tempdir.path())
        .write_stdin("")
        .assert()
        .success();

    assert_eq!("foo\n", read_to_string(tempdir.path().join("a.txt")).unwrap());
}

#[test]
fn second_session_finds_nothing() {
    let tempdir = fixture(&[("a.txt", "foo baz foo\n")]);

    rag_builtin()
        .args(["foo", "bar"])
        .arg(tempdir.path())
        .write_stdin("y\n")
        .assert()
        .success();

    rag_builtin()
        .args(["foo", "bar"])
        .arg(tempdir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Write changes").not());
}

#[test]
fn directory_defaults_to_current_directory() {
    let tempdir = fixture(&[("a.txt", "foo\n")]);

    rag_builtin()
        .current_dir(tempdir.path())
        .args(["foo", "bar"])
        .write_stdin("y\n")
        .assert()
        .success();

    assert_eq!("bar\n", read_to_string(tempdir.path().join("a.txt")).unwrap());
}

#[cfg(unix)]
#[test]
fn directory_name_need_not_be_utf8() {
    use std::{ffi::OsStr, fs::create_dir, os::unix::ffi::OsStrExt};

    let tempdir = tempfile::tempdir().unwrap();
    let root = tempdir.path().join(OsStr::from_bytes(b"dir\xff"));
    create_dir(&root).unwrap();
    std::fs::write(root.join("a.txt"), "foo\n").unwrap();

    rag_builtin()
        .args(["foo", "bar"])
        .arg(&root)
        .write_stdin("y\n")
        .assert()
        .success();

    assert_eq!("bar\n", read_to_string(root.join("a.txt")).unwrap());
}
