// ABOUTME: Executes a planned step sequence in order.
// ABOUTME: Each command is echoed before it runs; the first failure stops the run.

use snafu::ResultExt;

use super::error::{CommandSnafu, RunError};
use super::plan::{Step, StepKind};
use crate::exec::Executor;
use crate::output::Output;

/// Run every step in order, consuming the plan so no command runs twice.
pub async fn execute<E: Executor + ?Sized>(
    executor: &E,
    steps: Vec<Step>,
    output: &Output,
) -> Result<(), RunError> {
    let total = steps.len();

    for (index, step) in steps.into_iter().enumerate() {
        if step.kind == StepKind::Pull
            && let Some(target) = step.command.args().last()
        {
            output.progress(&format!("Pull repo: {target}"));
        }

        output.trace(&step.command);
        tracing::debug!(step = index + 1, total, kind = ?step.kind, "executing");

        executor.run(&step.command).await.context(CommandSnafu)?;
    }

    Ok(())
}
