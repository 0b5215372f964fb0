// ABOUTME: Executor trait for running command descriptions as real processes.
// ABOUTME: Only exit status is inspected; output goes where the command says.

mod process;

pub use process::ProcessExecutor;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::command::Command;

/// Runs commands. Implemented by [`ProcessExecutor`] and by test doubles.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Start the command and wait for it to exit.
    async fn run(&self, command: &Command) -> Result<(), CommandError>;

    /// Start the command in the background without waiting for it.
    fn spawn(&self, command: &Command) -> Result<DaemonHandle, CommandError>;
}

/// Errors from running a command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{command} failed with exit status {code}")]
    Exit { command: String, code: i32 },

    #[error("{command} was terminated by a signal")]
    Terminated { command: String },
}

impl CommandError {
    /// Exit code of the failed process, if it ran to completion.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            CommandError::Exit { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// A background process the run started but never joins.
#[derive(Debug)]
pub struct DaemonHandle {
    pid: Option<u32>,
    watcher: Option<JoinHandle<()>>,
}

impl DaemonHandle {
    pub fn new(pid: Option<u32>, watcher: Option<JoinHandle<()>>) -> Self {
        Self { pid, watcher }
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Whether the process is still believed to be running.
    pub fn is_running(&self) -> bool {
        self.watcher
            .as_ref()
            .map(|watcher| !watcher.is_finished())
            .unwrap_or(false)
    }
}
