// ABOUTME: Polls the daemon with a silent info probe until it answers.
// ABOUTME: Gives up after a fixed number of attempts and lets the run continue.

use crate::command::DockerCli;
use crate::config::ReadinessConfig;
use crate::diagnostics::{Diagnostics, Warning};
use crate::exec::Executor;

/// Outcome of readiness polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// A probe succeeded on the given attempt (1-based).
    Ready { attempt: u32 },
    /// Every attempt failed.
    Unreachable { attempts: u32 },
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready { .. })
    }
}

/// Probe once per interval until the daemon answers or attempts run out.
pub async fn wait_until_ready<E: Executor + ?Sized>(
    executor: &E,
    docker: &DockerCli,
    config: &ReadinessConfig,
    diag: &mut Diagnostics,
) -> Readiness {
    for attempt in 1..=config.attempts {
        match executor.run(&docker.probe()).await {
            Ok(()) => {
                tracing::debug!(attempt, "daemon is ready");
                return Readiness::Ready { attempt };
            }
            Err(e) => tracing::debug!(attempt, "daemon not ready: {}", e),
        }
        tokio::time::sleep(config.interval).await;
    }

    diag.warn(Warning::daemon_unreachable(format!(
        "daemon did not respond after {} attempt(s); continuing anyway",
        config.attempts
    )));

    Readiness::Unreachable {
        attempts: config.attempts,
    }
}
