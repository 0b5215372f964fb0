// ABOUTME: Write-once descriptions of external process invocations.
// ABOUTME: Arguments are fixed at construction; secrets are masked when rendered.

mod docker;

pub use docker::{DockerCli, daemon_command};

use std::fmt;
use std::path::{Path, PathBuf};

const MASK: &str = "********";

/// What happens to a child's stdout and stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Streams {
    /// Pass through to our own stdout/stderr.
    Forward,
    /// Send to the null device.
    Discard,
}

/// A single process invocation: program, arguments, and stream policy.
#[derive(Clone, PartialEq, Eq)]
pub struct Command {
    program: PathBuf,
    args: Vec<String>,
    streams: Streams,
    masked: Option<usize>,
}

impl Command {
    pub fn new<I, S>(program: impl Into<PathBuf>, args: I, streams: Streams) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            streams,
            masked: None,
        }
    }

    /// Hide the argument at `index` whenever the command is rendered.
    fn masking(mut self, index: usize) -> Self {
        self.masked = Some(index);
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn streams(&self) -> Streams {
        self.streams
    }

    /// The first argument, e.g. `pull` for `docker pull nginx:latest`.
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    fn rendered_args(&self) -> impl Iterator<Item = &str> {
        self.args.iter().enumerate().map(|(i, arg)| {
            if self.masked == Some(i) {
                MASK
            } else {
                arg.as_str()
            }
        })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in self.rendered_args() {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("program", &self.program)
            .field("args", &self.rendered_args().collect::<Vec<_>>())
            .field("streams", &self.streams)
            .finish()
    }
}
