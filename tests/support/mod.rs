// ABOUTME: Test support utilities.
// ABOUTME: Provides a recording executor and config builders for integration tests.

use async_trait::async_trait;
use image_promote::command::{Command, Streams};
use image_promote::config::{Config, PromotionRequest, ReadinessConfig};
use image_promote::exec::{CommandError, DaemonHandle, Executor};
use image_promote::types::{Repository, Tag};
use nonempty::NonEmpty;
use parking_lot::Mutex;
use std::sync::Once;
use std::time::Duration;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter =
            EnvFilter::from_default_env().add_directive("image_promote=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

struct FailRule {
    prefix: Vec<String>,
    remaining: Option<usize>,
}

impl FailRule {
    fn matches(&self, command: &Command) -> bool {
        self.remaining != Some(0)
            && command.args().len() >= self.prefix.len()
            && command.args().iter().zip(&self.prefix).all(|(a, p)| a == p)
    }
}

/// Executor that records every command instead of running it.
#[derive(Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<Command>>,
    spawned: Mutex<Vec<Command>>,
    rules: Mutex<Vec<FailRule>>,
    fail_spawn: bool,
}

#[allow(dead_code)]
impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every command whose arguments start with `prefix`.
    pub fn fail_on(self, prefix: &[&str]) -> Self {
        self.push_rule(prefix, None)
    }

    /// Fail the first `times` commands whose arguments start with `prefix`.
    pub fn fail_times(self, prefix: &[&str], times: usize) -> Self {
        self.push_rule(prefix, Some(times))
    }

    pub fn fail_spawn(mut self) -> Self {
        self.fail_spawn = true;
        self
    }

    fn push_rule(self, prefix: &[&str], remaining: Option<usize>) -> Self {
        self.rules.lock().push(FailRule {
            prefix: prefix.iter().map(|s| s.to_string()).collect(),
            remaining,
        });
        self
    }

    /// Arguments of every foreground command, joined with spaces.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .map(|c| c.args().join(" "))
            .collect()
    }

    /// Calls that forward their output: the promotion steps proper.
    pub fn steps(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.streams() == Streams::Forward)
            .map(|c| c.args().join(" "))
            .collect()
    }

    pub fn spawned(&self) -> Vec<Command> {
        self.spawned.lock().clone()
    }
}

#[async_trait]
impl Executor for RecordingExecutor {
    async fn run(&self, command: &Command) -> Result<(), CommandError> {
        self.calls.lock().push(command.clone());

        let mut rules = self.rules.lock();
        if let Some(rule) = rules.iter_mut().find(|r| r.matches(command)) {
            if let Some(remaining) = rule.remaining.as_mut() {
                *remaining -= 1;
            }
            return Err(CommandError::Exit {
                command: command.to_string(),
                code: 1,
            });
        }

        Ok(())
    }

    fn spawn(&self, command: &Command) -> Result<DaemonHandle, CommandError> {
        self.spawned.lock().push(command.clone());

        if self.fail_spawn {
            return Err(CommandError::Spawn {
                program: command.program().display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            });
        }

        Ok(DaemonHandle::new(Some(4242), None))
    }
}

/// Request promoting `src/app` to `dst/app` for the given tags.
#[allow(dead_code)]
pub fn request(tags: &[&str]) -> PromotionRequest {
    let tags: Vec<Tag> = tags.iter().map(|t| Tag::new(t).unwrap()).collect();
    PromotionRequest::new(
        Repository::new("src/app").unwrap(),
        Repository::new("dst/app").unwrap(),
        NonEmpty::from_vec(tags).expect("at least one tag"),
    )
}

/// Config with fast readiness polling and cleanup off.
#[allow(dead_code)]
pub fn config(tags: &[&str]) -> Config {
    let mut config = Config::new(request(tags));
    config.options.cleanup = false;
    config.executables.docker = "docker".into();
    config.executables.dockerd = "dockerd".into();
    config.readiness = ReadinessConfig {
        attempts: 3,
        interval: Duration::from_millis(1),
    };
    config
}
