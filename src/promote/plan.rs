// ABOUTME: Builds the ordered command list for a promotion.
// ABOUTME: Pure function of the request and options; nothing runs here.

use crate::command::{Command, DockerCli};
use crate::config::{PromotionRequest, RunOptions};

/// What a step does, for inspection without parsing arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Version,
    Info,
    Pull,
    Tag,
    Push,
    RemoveImage,
    Prune,
}

/// One command in the promotion sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub kind: StepKind,
    pub command: Command,
}

impl Step {
    fn new(kind: StepKind, command: Command) -> Self {
        Self { kind, command }
    }
}

/// Build the full step sequence:
///
/// 1. `version`, then `info`
/// 2. per tag, in order: `pull`, `tag`, `push` (unless dry-run), and with
///    cleanup two `rmi` calls for the source and destination references
/// 3. with cleanup, a single `system prune -f` after all tags
pub fn plan(docker: &DockerCli, request: &PromotionRequest, options: &RunOptions) -> Vec<Step> {
    let per_tag = 2 + usize::from(!options.dry_run) + if options.cleanup { 2 } else { 0 };
    let mut steps = Vec::with_capacity(3 + per_tag * request.tags.len());

    steps.push(Step::new(StepKind::Version, docker.version()));
    steps.push(Step::new(StepKind::Info, docker.info()));

    for tag in request.tags.iter() {
        let source = request.source.reference(tag);
        let target = request.destination.reference(tag);

        steps.push(Step::new(StepKind::Pull, docker.pull(&source)));
        steps.push(Step::new(StepKind::Tag, docker.tag(&source, &target)));

        if !options.dry_run {
            steps.push(Step::new(StepKind::Push, docker.push(&target)));
        }

        if options.cleanup {
            steps.push(Step::new(StepKind::RemoveImage, docker.remove_image(&source)));
            steps.push(Step::new(StepKind::RemoveImage, docker.remove_image(&target)));
        }
    }

    if options.cleanup {
        steps.push(Step::new(StepKind::Prune, docker.prune()));
    }

    steps
}
