use anstyle::{AnsiColor, Style};
use std::{
    io::{IsTerminal, Write},
    path::PathBuf,
};
use thiserror::Error as ThisError;

// `ColorizedError` is used only by the `rag` binary. It lives here next to `warn` because the two
// share their styling.

#[allow(clippy::module_name_repetitions)]
pub struct ColorizedError<E>(E)
where
    E: std::fmt::Debug;

impl<E> ColorizedError<E>
where
    E: std::fmt::Debug,
{
    #[allow(clippy::missing_const_for_fn)]
    pub fn new(error: E) -> Self {
        Self(error)
    }
}

// The use of `\r` is a bit of a hack: it overwrites the `Error: ` prefix that the standard
// library prints before the `Debug` representation of an error returned from `main`.
impl<E> std::fmt::Debug for ColorizedError<E>
where
    E: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if std::io::stdout().is_terminal() {
            let style = label_style(AnsiColor::Red);
            write!(f, "\r{style}Error{style:#}: ")?;
        }
        write!(f, "{:?}", self.0)
    }
}

pub type ColorizedResult<T> = Result<T, ColorizedError<anyhow::Error>>;

/// A failure confined to one candidate file. The session reports it and moves on.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, ThisError)]
pub enum FileError {
    #[error("Could not read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not create a scratch copy of `{}`: {source}", path.display())]
    Scratch {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Sed failed on {}: {message}", path.display())]
    Substitution { path: PathBuf, message: String },
    #[error("Could not read an answer for `{}`: {source}", path.display())]
    Prompt {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(
        "Could not write changes to {}: {source}; the proposed changes were discarded",
        path.display()
    )]
    Commit {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub fn warn(opts: &crate::opts::Rag, message: &str) {
    warn_unless(opts.quiet, message);
}

pub fn warn_unless(quiet: bool, message: &str) {
    if !quiet {
        emit(AnsiColor::Yellow, "Warning", message);
    }
}

/// Like [`warn`], but never silenced. Used for per-file failures.
pub fn report(message: &str) {
    emit(AnsiColor::Red, "Error", message);
}

#[allow(clippy::expect_used)]
fn emit(color: AnsiColor, label: &str, message: &str) {
    let style = label_style(color);
    // Writing directly to `stderr` avoids capture by `libtest`.
    std::io::stderr()
        .write_fmt(format_args!("{style}{label}{style:#}: {message}\n"))
        .expect("Could not write to stderr");
}

fn label_style(color: AnsiColor) -> Style {
    if std::io::stdout().is_terminal() {
        Style::new().fg_color(Some(color.into())).bold()
    } else {
        Style::new()
    }
}
