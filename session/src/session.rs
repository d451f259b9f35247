use crate::{
    confirm::{Answer, Confirmer},
    diff::DiffRenderer,
    error::{FileError, report, warn},
    opts::Rag,
    scratch::ScratchCopy,
    search::TextSearcher,
    transform::{Rule, TextTransformer},
};
use anyhow::{Context, Result, ensure};
use std::{
    fs::{read, read_dir},
    path::{Path, PathBuf},
};

/// What happened to one candidate file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Accepted,
    Declined,
    /// The substitution left the file as it was, so there was nothing to ask.
    Unchanged,
    Quit,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    pub candidates: usize,
    pub accepted: usize,
    pub declined: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub cancelled: bool,
}

/// The confirm loop: search once, then transform, diff, and prompt for each candidate in turn.
pub struct ReplaceSession<'a> {
    opts: &'a Rag,
    rule: Rule,
    root: PathBuf,
    searcher: &'a dyn TextSearcher,
    transformer: &'a dyn TextTransformer,
    renderer: &'a dyn DiffRenderer,
    confirmer: &'a mut dyn Confirmer,
}

impl<'a> ReplaceSession<'a> {
    pub fn new(
        opts: &'a Rag,
        searcher: &'a dyn TextSearcher,
        transformer: &'a dyn TextTransformer,
        renderer: &'a dyn DiffRenderer,
        confirmer: &'a mut dyn Confirmer,
    ) -> Self {
        Self {
            opts,
            rule: Rule {
                query: opts.query.clone(),
                replacement: opts.replacement.clone(),
            },
            root: opts.root(),
            searcher,
            transformer,
            renderer,
            confirmer,
        }
    }

    pub fn run(&mut self) -> Result<Summary> {
        let candidates = self.discover()?;
        log::debug!("{} candidate file(s)", candidates.len());

        let mut summary = Summary {
            candidates: candidates.len(),
            ..Summary::default()
        };

        for path in &candidates {
            match self.process_file(path) {
                Ok(Outcome::Accepted) => summary.accepted += 1,
                Ok(Outcome::Declined) => summary.declined += 1,
                Ok(Outcome::Unchanged) => summary.unchanged += 1,
                Ok(Outcome::Quit) => {
                    summary.cancelled = true;
                    break;
                }
                Err(error) => {
                    report(&error.to_string());
                    summary.failed += 1;
                }
            }
        }

        log::info!("{summary:?}");

        Ok(summary)
    }

    /// Lists the files under the root that match the query, in the searcher's order.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        ensure!(!self.rule.query.is_empty(), "Nothing to find: the query is empty");
        read_dir(&self.root)
            .with_context(|| format!("Could not read directory `{}`", self.root.display()))?;
        self.searcher
            .find_matches(&self.rule.query, &self.root)
            .with_context(|| format!("Could not search `{}`", self.root.display()))
    }

    /// Proposes the substitution for one file and applies it if the operator accepts.
    ///
    /// The scratch copy is gone when this returns, whichever way it returns.
    pub fn process_file(&mut self, path: &Path) -> Result<Outcome, FileError> {
        let mut scratch = ScratchCopy::new(path).map_err(|source| FileError::Scratch {
            path: path.to_path_buf(),
            source,
        })?;

        self.transformer
            .apply_global_replace(&self.rule, path, scratch.as_file_mut())
            .map_err(|error| FileError::Substitution {
                path: path.to_path_buf(),
                message: format!("{error:#}"),
            })?;

        let original = read(path).map_err(|source| FileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let proposed = read(scratch.path()).map_err(|source| FileError::Read {
            path: scratch.path().to_path_buf(),
            source,
        })?;
        if original == proposed {
            warn(
                self.opts,
                &format!("Substitution leaves {} unchanged", path.display()),
            );
            discard(scratch, path)?;
            return Ok(Outcome::Unchanged);
        }

        println!("\nMatches in {}:\n", path.display());
        if let Err(error) = self.renderer.render(path, scratch.path()) {
            warn(
                self.opts,
                &format!("Could not show changes to {}: {error:#}", path.display()),
            );
        }

        let prompt = format!("Write changes to {}? [y/n/q] ", path.display());
        let answer = self
            .confirmer
            .confirm(&prompt)
            .map_err(|source| FileError::Prompt {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("{}: {answer:?}", path.display());

        match answer {
            Answer::Accept => {
                scratch.promote().map_err(|source| FileError::Commit {
                    path: path.to_path_buf(),
                    source,
                })?;
                Ok(Outcome::Accepted)
            }
            Answer::Decline => {
                discard(scratch, path)?;
                Ok(Outcome::Declined)
            }
            Answer::Quit => {
                discard(scratch, path)?;
                Ok(Outcome::Quit)
            }
        }
    }
}

fn discard(scratch: ScratchCopy, path: &Path) -> Result<(), FileError> {
    scratch.discard().map_err(|source| FileError::Scratch {
        path: path.to_path_buf(),
        source,
    })
}
