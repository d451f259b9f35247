use anstyle::{AnsiColor, Style};
use anyhow::{Context, Result};
use rag_internal::Command;
use similar::{ChangeTag, DiffOp, TextDiff};
use std::{
    fs::read,
    io::{self, Write},
    path::Path,
};

const CONTEXT_LINES: usize = 3;

/// Shows the difference between a candidate file and its proposed contents.
pub trait DiffRenderer {
    fn render(&self, original: &Path, proposed: &Path) -> Result<()>;
}

/// `git diff --no-index --word-diff`, falling back to [`BuiltinDiff`] when git cannot be run.
pub struct GitDiff {
    color: bool,
    fallback: BuiltinDiff,
}

impl GitDiff {
    #[must_use]
    pub const fn new(color: bool) -> Self {
        Self {
            color,
            fallback: BuiltinDiff::new(color),
        }
    }
}

impl DiffRenderer for GitDiff {
    fn render(&self, original: &Path, proposed: &Path) -> Result<()> {
        let color = if self.color {
            "--color=always"
        } else {
            "--color=never"
        };
        // Captured, and shown only if git succeeds.
        let result = Command::new("git")
            .args(["--no-pager", "diff", "--no-index", "--word-diff", color, "--"])
            .args([original, proposed])
            .output_unchecked();

        // `git diff --no-index` exits with 1 when the files differ.
        match result {
            Ok(output) if matches!(output.status.code(), Some(0 | 1)) => {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                out.write_all(&output.stdout)
                    .and_then(|()| out.flush())
                    .context("Could not write diff")
            }
            Ok(output) => {
                log::warn!(
                    "`git diff` exited with {}: {}; using the builtin diff",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                self.fallback.render(original, proposed)
            }
            Err(error) => {
                log::warn!("Could not run `git`: {error}; using the builtin diff");
                self.fallback.render(original, proposed)
            }
        }
    }
}

/// Line diff with word-level emphasis, computed in-process.
///
/// Without color, removed words are shown as `[-word-]` and inserted words as `{+word+}`, the same
/// markers `git diff --word-diff` uses.
pub struct BuiltinDiff {
    color: bool,
}

impl BuiltinDiff {
    #[must_use]
    pub const fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn write_diff<W: Write>(&self, out: &mut W, original: &str, proposed: &str) -> io::Result<()> {
        let diff = TextDiff::from_lines(original, proposed);

        for group in diff.grouped_ops(CONTEXT_LINES) {
            self.write_hunk_header(out, &group)?;
            for op in &group {
                for change in diff.iter_inline_changes(op) {
                    let (sign, marker) = match change.tag() {
                        ChangeTag::Delete => ("-", Some(Marker::REMOVED)),
                        ChangeTag::Insert => ("+", Some(Marker::INSERTED)),
                        ChangeTag::Equal => (" ", None),
                    };
                    write!(out, "{sign}")?;
                    for (emphasized, value) in change.iter_strings_lossy() {
                        match marker {
                            Some(marker) if emphasized => self.write_marked(out, marker, &value)?,
                            Some(marker) if self.color => {
                                let style = marker.line_style();
                                let (text, newline) = split_newline(&value);
                                write!(out, "{style}{text}{style:#}{newline}")?;
                            }
                            _ => write!(out, "{value}")?,
                        }
                    }
                    if change.missing_newline() {
                        writeln!(out)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn write_hunk_header<W: Write>(&self, out: &mut W, group: &[DiffOp]) -> io::Result<()> {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            return Ok(());
        };
        let old_start = first.old_range().start;
        let old_len = last.old_range().end - old_start;
        let new_start = first.new_range().start;
        let new_len = last.new_range().end - new_start;
        let header = format!(
            "@@ -{},{old_len} +{},{new_len} @@",
            old_start + 1,
            new_start + 1
        );
        if self.color {
            let style = Style::new().fg_color(Some(AnsiColor::Cyan.into()));
            writeln!(out, "{style}{header}{style:#}")
        } else {
            writeln!(out, "{header}")
        }
    }

    fn write_marked<W: Write>(&self, out: &mut W, marker: Marker, value: &str) -> io::Result<()> {
        let (text, newline) = split_newline(value);
        if self.color {
            let style = marker.word_style();
            write!(out, "{style}{text}{style:#}{newline}")
        } else {
            write!(out, "{}{text}{}{newline}", marker.open, marker.close)
        }
    }
}

impl DiffRenderer for BuiltinDiff {
    fn render(&self, original: &Path, proposed: &Path) -> Result<()> {
        let before = read(original)
            .with_context(|| format!("`read` failed for `{}`", original.display()))?;
        let after = read(proposed)
            .with_context(|| format!("`read` failed for `{}`", proposed.display()))?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_diff(
            &mut out,
            &String::from_utf8_lossy(&before),
            &String::from_utf8_lossy(&after),
        )
        .and_then(|()| out.flush())
        .context("Could not write diff")
    }
}

#[derive(Clone, Copy)]
struct Marker {
    open: &'static str,
    close: &'static str,
    color: AnsiColor,
}

impl Marker {
    const REMOVED: Self = Self {
        open: "[-",
        close: "-]",
        color: AnsiColor::Red,
    };

    const INSERTED: Self = Self {
        open: "{+",
        close: "+}",
        color: AnsiColor::Green,
    };

    fn line_style(self) -> Style {
        Style::new().fg_color(Some(self.color.into()))
    }

    fn word_style(self) -> Style {
        self.line_style().bold().underline()
    }
}

fn split_newline(value: &str) -> (&str, &str) {
    value
        .strip_suffix('\n')
        .map_or((value, ""), |text| (text, "\n"))
}
