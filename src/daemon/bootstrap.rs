// ABOUTME: Launches the image daemon as a detached background process.
// ABOUTME: Launch errors are recorded and otherwise surface as a readiness timeout.

use std::path::Path;

use crate::command::daemon_command;
use crate::config::DaemonConfig;
use crate::diagnostics::{Diagnostics, Warning};
use crate::exec::{DaemonHandle, Executor};
use crate::output::Output;

/// Start the daemon unless it is disabled. Never waits on the process.
pub fn bootstrap<E: Executor + ?Sized>(
    executor: &E,
    dockerd: &Path,
    config: &DaemonConfig,
    output: &Output,
    diag: &mut Diagnostics,
) -> Option<DaemonHandle> {
    if config.disabled {
        tracing::debug!("daemon startup disabled, assuming one is already running");
        return None;
    }

    let command = daemon_command(dockerd, config);
    output.trace(&command);

    match executor.spawn(&command) {
        Ok(handle) => {
            tracing::debug!(pid = ?handle.pid(), "daemon started");
            Some(handle)
        }
        Err(e) => {
            diag.warn(Warning::daemon_start(format!("daemon did not start: {e}")));
            None
        }
    }
}
