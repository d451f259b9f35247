use crate::error::warn_unless;
use anyhow::{Context, Result, bail};
use rag_internal::Command;
use regex::Regex;
use std::{
    fs::read_to_string,
    io::ErrorKind,
    path::{Path, PathBuf},
    process::Output,
};
use walkdir::{DirEntry, WalkDir};

/// Lists the files under a root whose contents match a query.
pub trait TextSearcher {
    fn find_matches(&self, query: &str, root: &Path) -> Result<Vec<PathBuf>>;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchProgram {
    Ag,
    Ack,
    Grep,
}

impl SearchProgram {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ag => "ag",
            Self::Ack => "ack",
            Self::Grep => "grep",
        }
    }

    fn command(self, query: &str, root: &Path) -> Command {
        let mut command = Command::new(self.name());
        match self {
            Self::Ag | Self::Ack => command.args(["--files-with-matches", "--nocolor"]),
            Self::Grep => command.args(["--recursive", "--files-with-matches", "-E"]),
        };
        command.args(["--", query]).args([root]);
        command
    }
}

/// Runs an external recursive search program.
pub struct ExternalSearcher {
    programs: Vec<SearchProgram>,
    quiet: bool,
}

impl ExternalSearcher {
    /// Uses the first of `ag`, `ack`, and `grep` that can be run.
    #[must_use]
    pub fn auto() -> Self {
        Self {
            programs: vec![SearchProgram::Ag, SearchProgram::Ack, SearchProgram::Grep],
            quiet: false,
        }
    }

    #[must_use]
    pub fn only(program: SearchProgram) -> Self {
        Self {
            programs: vec![program],
            quiet: false,
        }
    }

    /// Suppresses the warning shown when the program reports errors but still lists files.
    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl TextSearcher for ExternalSearcher {
    fn find_matches(&self, query: &str, root: &Path) -> Result<Vec<PathBuf>> {
        for &program in &self.programs {
            match program.command(query, root).output_unchecked() {
                Ok(output) => {
                    let listing = interpret(program, &output)?;
                    if let Some(diagnostics) = listing.diagnostics {
                        warn_unless(self.quiet, &diagnostics);
                    }
                    return Ok(listing.paths);
                }
                Err(error) if error.kind() == ErrorKind::NotFound => {
                    log::debug!("`{}` not found", program.name());
                }
                Err(error) => {
                    return Err(error).with_context(|| format!("Could not run `{}`", program.name()));
                }
            }
        }

        let names = self
            .programs
            .iter()
            .map(|program| format!("`{}`", program.name()))
            .collect::<Vec<_>>();
        bail!(
            "No suitable search program could be run (tried {})",
            names.join(", ")
        );
    }
}

#[derive(Debug)]
struct Listing {
    paths: Vec<PathBuf>,
    diagnostics: Option<String>,
}

/// ag, ack, and grep all exit with status 1 when nothing matched. Any other failure that printed
/// nothing at all is also taken to mean "no matches". A failure that still listed files (e.g.,
/// `grep -r` exits with 2 when some file is unreadable) keeps the listed files, and the program's
/// diagnostics become a warning.
fn interpret(program: SearchProgram, output: &Output) -> Result<Listing> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let paths = stdout
        .lines()
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect::<Vec<_>>();

    if output.status.success() {
        return Ok(Listing {
            paths,
            diagnostics: None,
        });
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if paths.is_empty() {
        let nothing_matched = output.status.code() == Some(1) || stderr.trim().is_empty();
        if nothing_matched {
            return Ok(Listing {
                paths,
                diagnostics: None,
            });
        }
        bail!(
            "`{}` failed ({}): {}",
            program.name(),
            output.status,
            stderr.trim()
        );
    }

    Ok(Listing {
        paths,
        diagnostics: Some(format!(
            "`{}` exited with {}: {}",
            program.name(),
            output.status,
            stderr.trim()
        )),
    })
}

/// Walks the tree in-process. Entries are visited in file-name order; `.git` directories and files
/// that are not valid UTF-8 are skipped.
pub struct BuiltinSearcher;

impl TextSearcher for BuiltinSearcher {
    fn find_matches(&self, query: &str, root: &Path) -> Result<Vec<PathBuf>> {
        let re = Regex::new(query).with_context(|| format!("Invalid pattern `{query}`"))?;

        let mut paths = Vec::new();
        for result in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_git_dir(entry))
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(error) => {
                    log::warn!("{error}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(contents) = read_to_string(entry.path()) else {
                log::debug!("skipping `{}`", entry.path().display());
                continue;
            };
            if re.is_match(&contents) {
                paths.push(entry.into_path());
            }
        }
        Ok(paths)
    }
}

fn is_git_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == ".git"
}
