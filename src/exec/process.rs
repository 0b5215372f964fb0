// ABOUTME: Executor backed by tokio child processes.
// ABOUTME: Foreground commands are awaited; the daemon is reaped by a watcher task.

use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};

use super::{CommandError, DaemonHandle, Executor};
use crate::command::{Command, Streams};

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    fn build(command: &Command) -> tokio::process::Command {
        let mut process = tokio::process::Command::new(command.program());
        process.args(command.args()).stdin(Stdio::null());

        match command.streams() {
            Streams::Forward => process.stdout(Stdio::inherit()).stderr(Stdio::inherit()),
            Streams::Discard => process.stdout(Stdio::null()).stderr(Stdio::null()),
        };

        process
    }

    fn spawn_error(command: &Command, source: std::io::Error) -> CommandError {
        CommandError::Spawn {
            program: command.program().display().to_string(),
            source,
        }
    }
}

fn check_status(command: &Command, status: ExitStatus) -> Result<(), CommandError> {
    if status.success() {
        return Ok(());
    }

    match status.code() {
        Some(code) => Err(CommandError::Exit {
            command: command.to_string(),
            code,
        }),
        None => Err(CommandError::Terminated {
            command: command.to_string(),
        }),
    }
}

#[async_trait]
impl Executor for ProcessExecutor {
    async fn run(&self, command: &Command) -> Result<(), CommandError> {
        let status = Self::build(command)
            .status()
            .await
            .map_err(|e| Self::spawn_error(command, e))?;

        check_status(command, status)
    }

    fn spawn(&self, command: &Command) -> Result<DaemonHandle, CommandError> {
        let mut child = Self::build(command)
            .spawn()
            .map_err(|e| Self::spawn_error(command, e))?;

        let pid = child.id();
        let program = command.program().display().to_string();
        let watcher = tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => tracing::warn!("{} exited: {}", program, status),
                Err(e) => tracing::error!("failed to wait on {}: {}", program, e),
            }
        });

        Ok(DaemonHandle::new(pid, Some(watcher)))
    }
}
