// ABOUTME: Builders for the docker client and daemon invocations.
// ABOUTME: Each call returns a fresh Command; nothing is executed here.

use std::path::{Path, PathBuf};

use super::{Command, Streams};
use crate::config::{Credential, DaemonConfig};

/// Builds invocations of the image client binary.
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: PathBuf,
}

impl DockerCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Command::new(&self.program, args, Streams::Forward)
    }

    pub fn version(&self) -> Command {
        self.command(["version"])
    }

    pub fn info(&self) -> Command {
        self.command(["info"])
    }

    /// Silent `info` used to check whether the daemon answers yet.
    pub fn probe(&self) -> Command {
        Command::new(&self.program, ["info"], Streams::Discard)
    }

    /// `login -u <user> -p <password> [-e <email>] <registry>`, or `None` for
    /// a guest credential.
    pub fn login(&self, credential: &Credential) -> Option<Command> {
        if credential.is_guest() {
            return None;
        }

        let mut args = vec![
            "login".to_string(),
            "-u".to_string(),
            credential.username.clone(),
            "-p".to_string(),
            credential.password.clone(),
        ];
        if let Some(email) = credential.email() {
            args.push("-e".to_string());
            args.push(email.to_string());
        }
        args.push(credential.registry.clone());

        Some(Command::new(&self.program, args, Streams::Discard).masking(4))
    }

    pub fn pull(&self, reference: &str) -> Command {
        self.command(["pull", reference])
    }

    pub fn tag(&self, source: &str, target: &str) -> Command {
        self.command(["tag", source, target])
    }

    pub fn push(&self, reference: &str) -> Command {
        self.command(["push", reference])
    }

    pub fn remove_image(&self, reference: &str) -> Command {
        self.command(["rmi", reference])
    }

    pub fn prune(&self) -> Command {
        self.command(["system", "prune", "-f"])
    }
}

/// The long-running daemon invocation. Output is only forwarded in debug mode.
pub fn daemon_command(dockerd: &Path, config: &DaemonConfig) -> Command {
    let streams = if config.debug {
        Streams::Forward
    } else {
        Streams::Discard
    };
    Command::new(dockerd, config.args(), streams)
}
