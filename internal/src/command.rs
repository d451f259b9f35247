use std::{
    ffi::OsStr,
    io,
    process::{Command as StdCommand, Output, Stdio},
};

pub struct Command {
    command: StdCommand,
}

impl Command {
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            command: StdCommand::new(program),
        }
    }

    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.command.args(args);
        self
    }

    pub fn stdin<T: Into<Stdio>>(&mut self, cfg: T) -> &mut Self {
        self.command.stdin(cfg);
        self
    }

    pub fn stdout<T: Into<Stdio>>(&mut self, cfg: T) -> &mut Self {
        self.command.stdout(cfg);
        self
    }

    pub fn stderr<T: Into<Stdio>>(&mut self, cfg: T) -> &mut Self {
        self.command.stderr(cfg);
        self
    }

    /// Runs the command and captures its output without interpreting the exit status.
    ///
    /// The error is the raw `io::Error` from spawning, so callers can distinguish a missing
    /// program (`io::ErrorKind::NotFound`) from other failures.
    pub fn output_unchecked(&mut self) -> io::Result<Output> {
        self.log();
        self.command.output()
    }

    fn log(&self) {
        log::debug!("{:?}", self.command.get_envs().collect::<Vec<_>>());
        log::debug!("{:?}", self.command.get_current_dir());
        log::debug!("{:?}", self.command);
    }
}
