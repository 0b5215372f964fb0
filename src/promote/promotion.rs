// ABOUTME: End-to-end promotion run: daemon, readiness, logins, then the plan.
// ABOUTME: Owns the daemon handle for the lifetime of the run.

use crate::auth::{self, LoginSide};
use crate::command::DockerCli;
use crate::config::Config;
use crate::daemon::{self, Readiness};
use crate::diagnostics::Diagnostics;
use crate::exec::{DaemonHandle, Executor};
use crate::output::Output;

use super::error::RunError;
use super::plan::plan;
use super::runner::execute;

/// A single promotion run against one executor.
pub struct Promotion<E> {
    config: Config,
    executor: E,
    docker: DockerCli,
    daemon: Option<DaemonHandle>,
}

impl<E: Executor> Promotion<E> {
    pub fn new(config: Config, executor: E) -> Self {
        let docker = DockerCli::new(&config.executables.docker);
        Self {
            config,
            executor,
            docker,
            daemon: None,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Handle of the daemon this run started, if any.
    pub fn daemon(&self) -> Option<&DaemonHandle> {
        self.daemon.as_ref()
    }

    /// Start the daemon, wait for it, log in, then run every promotion step.
    ///
    /// # Errors
    ///
    /// Returns `RunError::Authentication` if either login fails, before any
    /// tag is processed, and `RunError::Command` for the first promotion
    /// command that fails. Nothing runs after the failing command.
    pub async fn run(&mut self, output: &Output, diag: &mut Diagnostics) -> Result<(), RunError> {
        self.daemon = daemon::bootstrap(
            &self.executor,
            &self.config.executables.dockerd,
            &self.config.daemon,
            output,
            diag,
        );

        let readiness =
            daemon::wait_until_ready(&self.executor, &self.docker, &self.config.readiness, diag)
                .await;
        if let Readiness::Unreachable { attempts } = readiness {
            tracing::info!(attempts, "proceeding without a confirmed daemon");
        }

        auth::login(
            &self.executor,
            &self.docker,
            LoginSide::Pull,
            &self.config.pull_login,
            output,
        )
        .await?;
        auth::login(
            &self.executor,
            &self.docker,
            LoginSide::Push,
            &self.config.push_login,
            output,
        )
        .await?;

        let steps = plan(&self.docker, &self.config.promote, &self.config.options);
        tracing::info!(
            steps = steps.len(),
            tags = self.config.promote.tags.len(),
            dry_run = self.config.options.dry_run,
            cleanup = self.config.options.cleanup,
            "promoting {} to {}",
            self.config.promote.source,
            self.config.promote.destination
        );

        execute(&self.executor, steps, output).await
    }
}
