// ABOUTME: Registry logins for the pull and push sides of a promotion.
// ABOUTME: Sides without a password run in guest mode; a failed login aborts the run.

use snafu::ResultExt;
use std::fmt;

use crate::command::DockerCli;
use crate::config::Credential;
use crate::exec::Executor;
use crate::output::Output;
use crate::promote::{AuthenticationSnafu, RunError};

/// Which registry a credential belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginSide {
    Pull,
    Push,
}

impl fmt::Display for LoginSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginSide::Pull => write!(f, "pull"),
            LoginSide::Push => write!(f, "push"),
        }
    }
}

/// Result of a successful login step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated,
    Guest,
}

/// Log in to the registry for one side, or announce guest mode.
pub async fn login<E: Executor + ?Sized>(
    executor: &E,
    docker: &DockerCli,
    side: LoginSide,
    credential: &Credential,
    output: &Output,
) -> Result<LoginOutcome, RunError> {
    let Some(command) = docker.login(credential) else {
        output.progress(&guest_message(side));
        return Ok(LoginOutcome::Guest);
    };

    output.progress(&format!(
        "Logging in to {} registry {}",
        side, credential.registry
    ));
    tracing::debug!(%side, "running {}", command);

    executor
        .run(&command)
        .await
        .context(AuthenticationSnafu { side })?;

    Ok(LoginOutcome::Authenticated)
}

fn guest_message(side: LoginSide) -> String {
    let side = match side {
        LoginSide::Pull => "Pull",
        LoginSide::Push => "Push",
    };
    format!("{side} registry credentials not provided. Guest mode enabled.")
}
