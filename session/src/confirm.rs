use std::io::{self, BufRead, StdinLock, Stdout, Write};

pub const ACCEPT_TOKEN: &str = "y";
pub const QUIT_TOKEN: &str = "q";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Answer {
    Accept,
    Decline,
    Quit,
}

impl Answer {
    /// Only the exact tokens count. A trailing line ending is ignored; anything else, including
    /// `Y` or ` y`, declines.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        match line {
            ACCEPT_TOKEN => Self::Accept,
            QUIT_TOKEN => Self::Quit,
            _ => Self::Decline,
        }
    }
}

/// Asks the operator about one file and blocks until they answer.
pub trait Confirmer {
    fn confirm(&mut self, prompt: &str) -> io::Result<Answer>;
}

pub struct TerminalConfirmer<R, W> {
    input: R,
    output: W,
}

impl TerminalConfirmer<StdinLock<'static>, Stdout> {
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R, W> TerminalConfirmer<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirmer for TerminalConfirmer<R, W> {
    fn confirm(&mut self, prompt: &str) -> io::Result<Answer> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            // End of input. Nobody is left to say yes.
            writeln!(self.output)?;
            return Ok(Answer::Decline);
        }
        Ok(Answer::parse(&line))
    }
}
