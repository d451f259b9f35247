use anyhow::{Context, Result, ensure};
use rag_internal::{Command, sed::replace_all};
use std::{
    fs::{File, read_to_string},
    io::Write,
    path::Path,
    process::Stdio,
};

/// A query and the string that replaces each of its matches.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rule {
    pub query: String,
    pub replacement: String,
}

/// Writes the global substitution of a [`Rule`] applied to `source` into `destination`.
pub trait TextTransformer {
    fn apply_global_replace(&self, rule: &Rule, source: &Path, destination: &mut File)
    -> Result<()>;
}

/// Pipes the file through `sed -E`.
pub struct SedTransformer;

impl TextTransformer for SedTransformer {
    fn apply_global_replace(
        &self,
        rule: &Rule,
        source: &Path,
        destination: &mut File,
    ) -> Result<()> {
        let input = File::open(source)
            .with_context(|| format!("Could not open `{}`", source.display()))?;
        let output = destination
            .try_clone()
            .context("Could not duplicate scratch file handle")?;

        let output = Command::new("sed")
            .args(["-E", "-e", &sed_script(rule)])
            .stdin(input)
            .stdout(output)
            .stderr(Stdio::piped())
            .output_unchecked()
            .context("Could not run `sed`")?;

        ensure!(
            output.status.success(),
            "`sed` exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );

        Ok(())
    }
}

fn sed_script(rule: &Rule) -> String {
    format!(
        "s/{}/{}/g",
        escape_delimiter(&rule.query),
        escape_delimiter(&rule.replacement)
    )
}

/// Escapes each `/` that is not already escaped, so that it does not end the `s` command early.
fn escape_delimiter(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                escaped.push(c);
                if let Some(next) = chars.next() {
                    escaped.push(next);
                }
            }
            '/' => escaped.push_str("\\/"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Substitutes in-process with the `regex` crate. Replacements may use `$1` or `${name}`.
pub struct RegexTransformer;

impl TextTransformer for RegexTransformer {
    fn apply_global_replace(
        &self,
        rule: &Rule,
        source: &Path,
        destination: &mut File,
    ) -> Result<()> {
        let before = read_to_string(source)
            .with_context(|| format!("`read_to_string` failed for `{}`", source.display()))?;
        let after = replace_all(&before, &rule.query, &rule.replacement)?;
        destination
            .write_all(after.as_bytes())
            .and_then(|()| destination.flush())
            .context("Could not write scratch file")
    }
}
