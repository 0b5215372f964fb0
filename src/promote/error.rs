// ABOUTME: Run-level error types with SNAFU pattern.
// ABOUTME: Login failures carry the side; command failures pass through verbatim.

use snafu::Snafu;

use crate::auth::LoginSide;
use crate::exec::CommandError;

/// Fatal error that ends a promotion run.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RunError {
    #[snafu(display("{side} login error authenticating: {source}"))]
    Authentication {
        side: LoginSide,
        source: CommandError,
    },

    #[snafu(display("{source}"))]
    Command { source: CommandError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunErrorKind {
    /// Pull-side registry login failed.
    PullAuthentication,
    /// Push-side registry login failed.
    PushAuthentication,
    /// A promotion command exited non-zero or could not start.
    Command,
}

impl RunError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> RunErrorKind {
        match self {
            RunError::Authentication {
                side: LoginSide::Pull,
                ..
            } => RunErrorKind::PullAuthentication,
            RunError::Authentication {
                side: LoginSide::Push,
                ..
            } => RunErrorKind::PushAuthentication,
            RunError::Command { .. } => RunErrorKind::Command,
        }
    }

    /// The underlying command failure.
    pub fn command_error(&self) -> &CommandError {
        match self {
            RunError::Authentication { source, .. } | RunError::Command { source } => source,
        }
    }
}
