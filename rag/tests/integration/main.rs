mod failures;
mod prompts;

use assert_cmd::cargo::cargo_bin_cmd;
use std::{fs::write, path::Path};
use tempfile::TempDir;

/// Runs `rag` with the in-process collaborators, so the tests do not depend on which search,
/// substitution, and diff programs are installed.
fn rag_builtin() -> assert_cmd::Command {
    let mut command = cargo_bin_cmd!("rag");
    command.args([
        "--search-tool",
        "builtin",
        "--transform",
        "builtin",
        "--diff",
        "builtin",
        "--color",
        "never",
    ]);
    command
}

fn fixture(files: &[(&str, &str)]) -> TempDir {
    let tempdir = tempfile::tempdir().unwrap();
    for (name, contents) in files {
        write(tempdir.path().join(name), contents).unwrap();
    }
    tempdir
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    names.sort();
    names
}
