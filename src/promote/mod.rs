// ABOUTME: Promotion planning, execution, and the end-to-end run.
// ABOUTME: Plans are pure step lists; execution stops at the first failure.

mod error;
mod plan;
mod promotion;
mod runner;

pub use error::{AuthenticationSnafu, CommandSnafu, RunError, RunErrorKind};
pub use plan::{Step, StepKind, plan};
pub use promotion::Promotion;
pub use runner::execute;
