//! Deterministic stand-ins for the external tools and the terminal.

use crate::{
    confirm::{Answer, Confirmer},
    diff::DiffRenderer,
    search::TextSearcher,
    transform::{RegexTransformer, Rule, TextTransformer},
};
use anyhow::{Result, bail};
use std::{
    cell::RefCell,
    collections::VecDeque,
    ffi::OsString,
    fs::File,
    io,
    path::{Path, PathBuf},
};

/// Reports the same paths whatever the query.
pub struct FixedSearcher(pub Vec<PathBuf>);

impl TextSearcher for FixedSearcher {
    fn find_matches(&self, _query: &str, _root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self.0.clone())
    }
}

/// Substitutes with [`RegexTransformer`], remembering each source path. Fails for files named
/// `fail_on`.
#[derive(Default)]
pub struct RecordingTransformer {
    pub calls: RefCell<Vec<PathBuf>>,
    pub fail_on: Option<OsString>,
}

impl TextTransformer for RecordingTransformer {
    fn apply_global_replace(
        &self,
        rule: &Rule,
        source: &Path,
        destination: &mut File,
    ) -> Result<()> {
        self.calls.borrow_mut().push(source.to_path_buf());
        if self.fail_on.is_some() && source.file_name() == self.fail_on.as_deref() {
            bail!("unterminated `s' command");
        }
        RegexTransformer.apply_global_replace(rule, source, destination)
    }
}

pub struct NullRenderer;

impl DiffRenderer for NullRenderer {
    fn render(&self, _original: &Path, _proposed: &Path) -> Result<()> {
        Ok(())
    }
}

/// Answers from a script, as if each entry were typed on its own line. Declines once the script
/// runs out.
pub struct ScriptedConfirmer {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl ScriptedConfirmer {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|&answer| answer.to_owned()).collect(),
            prompts: Vec::new(),
        }
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&mut self, prompt: &str) -> io::Result<Answer> {
        self.prompts.push(prompt.to_owned());
        Ok(self
            .answers
            .pop_front()
            .map_or(Answer::Decline, |line| Answer::parse(&line)))
    }
}
