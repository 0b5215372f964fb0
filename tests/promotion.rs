// ABOUTME: Integration tests for the end-to-end promotion run.
// ABOUTME: Uses a recording executor to check ordering, logins and fail-fast behavior.

mod support;

use image_promote::command::DockerCli;
use image_promote::config::{Credential, ReadinessConfig};
use image_promote::daemon::{Readiness, wait_until_ready};
use image_promote::diagnostics::{Diagnostics, WarningKind};
use image_promote::output::Output;
use image_promote::promote::{Promotion, RunErrorKind};
use std::time::Duration;
use support::{RecordingExecutor, config, init_tracing};

/// Test: two tags without cleanup run version, info, then pull/tag/push per tag.
#[tokio::test]
async fn promotes_each_tag_in_order() {
    init_tracing();
    let mut promotion = Promotion::new(config(&["v1", "v2"]), RecordingExecutor::new());
    let mut diag = Diagnostics::default();

    promotion
        .run(&Output::default(), &mut diag)
        .await
        .unwrap();

    assert_eq!(
        promotion.executor().steps(),
        vec![
            "version",
            "info",
            "pull src/app:v1",
            "tag src/app:v1 dst/app:v1",
            "push dst/app:v1",
            "pull src/app:v2",
            "tag src/app:v2 dst/app:v2",
            "push dst/app:v2",
        ]
    );
    assert!(!diag.has_warnings());
}

/// Test: guest credentials never produce a login call.
#[tokio::test]
async fn guest_mode_skips_login() {
    let mut promotion = Promotion::new(config(&["v1"]), RecordingExecutor::new());

    promotion
        .run(&Output::default(), &mut Diagnostics::default())
        .await
        .unwrap();

    assert!(
        promotion
            .executor()
            .calls()
            .iter()
            .all(|c| !c.starts_with("login"))
    );
}

/// Test: both sides log in before any promotion command.
#[tokio::test]
async fn logins_precede_promotion() {
    let mut cfg = config(&["v1"]);
    cfg.pull_login = Credential::new("pull.example.com", "reader", "r-pass");
    cfg.push_login =
        Credential::new("push.example.com", "writer", "w-pass").with_email("ci@example.com");
    let mut promotion = Promotion::new(cfg, RecordingExecutor::new());

    promotion
        .run(&Output::default(), &mut Diagnostics::default())
        .await
        .unwrap();

    let calls = promotion.executor().calls();
    let logins: Vec<_> = calls.iter().filter(|c| c.starts_with("login")).collect();
    assert_eq!(
        logins,
        vec![
            "login -u reader -p r-pass pull.example.com",
            "login -u writer -p w-pass -e ci@example.com push.example.com",
        ]
    );

    let last_login = calls.iter().rposition(|c| c.starts_with("login")).unwrap();
    let version = calls.iter().position(|c| c == "version").unwrap();
    assert!(last_login < version);
}

/// Test: a failed pull-side login aborts before any tag command.
#[tokio::test]
async fn pull_login_failure_aborts_run() {
    let mut cfg = config(&["v1"]);
    cfg.pull_login = Credential::new("pull.example.com", "reader", "wrong");
    cfg.push_login = Credential::new("push.example.com", "writer", "w-pass");
    let executor = RecordingExecutor::new().fail_on(&["login", "-u", "reader"]);
    let mut promotion = Promotion::new(cfg, executor);

    let err = promotion
        .run(&Output::default(), &mut Diagnostics::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), RunErrorKind::PullAuthentication);
    assert!(err.to_string().starts_with("pull login error authenticating"));
    assert!(!err.to_string().contains("wrong"), "password must be masked");
    assert!(promotion.executor().steps().is_empty());

    let logins = promotion
        .executor()
        .calls()
        .into_iter()
        .filter(|c| c.starts_with("login"))
        .count();
    assert_eq!(logins, 1, "push login must not be attempted");
}

/// Test: a failed push-side login is reported as such.
#[tokio::test]
async fn push_login_failure_names_push_side() {
    let mut cfg = config(&["v1"]);
    cfg.push_login = Credential::new("push.example.com", "writer", "wrong");
    let executor = RecordingExecutor::new().fail_on(&["login"]);
    let mut promotion = Promotion::new(cfg, executor);

    let err = promotion
        .run(&Output::default(), &mut Diagnostics::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), RunErrorKind::PushAuthentication);
    assert!(promotion.executor().steps().is_empty());
}

/// Test: the first failing command stops everything after it.
#[tokio::test]
async fn failing_pull_stops_remaining_steps() {
    let mut cfg = config(&["v1", "v2"]);
    cfg.options.cleanup = true;
    let executor = RecordingExecutor::new().fail_on(&["pull", "src/app:v1"]);
    let mut promotion = Promotion::new(cfg, executor);

    let err = promotion
        .run(&Output::default(), &mut Diagnostics::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), RunErrorKind::Command);
    assert_eq!(err.command_error().exit_code(), Some(1));
    assert_eq!(
        promotion.executor().steps(),
        vec!["version", "info", "pull src/app:v1"]
    );
}

/// Test: a failing push on the second tag leaves the first tag's work done.
#[tokio::test]
async fn failing_push_stops_before_prune() {
    let mut cfg = config(&["v1", "v2"]);
    cfg.options.cleanup = true;
    let executor = RecordingExecutor::new().fail_on(&["push", "dst/app:v2"]);
    let mut promotion = Promotion::new(cfg, executor);

    assert!(
        promotion
            .run(&Output::default(), &mut Diagnostics::default())
            .await
            .is_err()
    );

    let steps = promotion.executor().steps();
    assert_eq!(steps.last().map(String::as_str), Some("push dst/app:v2"));
    assert!(steps.contains(&"rmi dst/app:v1".to_string()));
    assert!(!steps.iter().any(|s| s.starts_with("system prune")));
}

/// Test: dry run still pulls, tags and cleans up but never pushes.
#[tokio::test]
async fn dry_run_never_pushes() {
    let mut cfg = config(&["v1"]);
    cfg.options.dry_run = true;
    cfg.options.cleanup = true;
    let mut promotion = Promotion::new(cfg, RecordingExecutor::new());

    promotion
        .run(&Output::default(), &mut Diagnostics::default())
        .await
        .unwrap();

    assert_eq!(
        promotion.executor().steps(),
        vec![
            "version",
            "info",
            "pull src/app:v1",
            "tag src/app:v1 dst/app:v1",
            "rmi src/app:v1",
            "rmi dst/app:v1",
            "system prune -f",
        ]
    );
}

/// Test: the daemon is launched once with derived arguments and kept by the run.
#[tokio::test]
async fn starts_daemon_with_derived_args() {
    let mut cfg = config(&["v1"]);
    cfg.daemon.mirror = Some("https://mirror.example.com".to_string());
    cfg.daemon.dns = vec!["8.8.8.8".to_string()];
    let mut promotion = Promotion::new(cfg, RecordingExecutor::new());

    promotion
        .run(&Output::default(), &mut Diagnostics::default())
        .await
        .unwrap();

    let spawned = promotion.executor().spawned();
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].program().to_str(), Some("dockerd"));
    assert_eq!(
        spawned[0].args(),
        [
            "-g",
            "/var/lib/docker",
            "--registry-mirror",
            "https://mirror.example.com",
            "--dns",
            "8.8.8.8"
        ]
    );
    assert_eq!(promotion.daemon().and_then(|d| d.pid()), Some(4242));
}

/// Test: a disabled daemon is never launched.
#[tokio::test]
async fn disabled_daemon_is_not_started() {
    let mut cfg = config(&["v1"]);
    cfg.daemon.disabled = true;
    let mut promotion = Promotion::new(cfg, RecordingExecutor::new());

    promotion
        .run(&Output::default(), &mut Diagnostics::default())
        .await
        .unwrap();

    assert!(promotion.executor().spawned().is_empty());
    assert!(promotion.daemon().is_none());
}

/// Test: launch failure is only a warning; the run carries on.
#[tokio::test]
async fn daemon_launch_failure_is_not_fatal() {
    let mut promotion = Promotion::new(config(&["v1"]), RecordingExecutor::new().fail_spawn());
    let mut diag = Diagnostics::default();

    promotion
        .run(&Output::default(), &mut diag)
        .await
        .unwrap();

    assert!(diag.contains(WarningKind::DaemonStart));
    assert!(promotion.daemon().is_none());
}

/// Test: an unreachable daemon surfaces through the first real command.
#[tokio::test]
async fn unreachable_daemon_fails_at_info_step() {
    let executor = RecordingExecutor::new().fail_on(&["info"]);
    let mut promotion = Promotion::new(config(&["v1"]), executor);
    let mut diag = Diagnostics::default();

    let err = promotion
        .run(&Output::default(), &mut diag)
        .await
        .unwrap_err();

    assert!(diag.contains(WarningKind::DaemonUnreachable));
    assert_eq!(err.kind(), RunErrorKind::Command);
    assert_eq!(promotion.executor().steps(), vec!["version", "info"]);
}

/// Test: polling stops at the first successful probe.
#[tokio::test]
async fn readiness_stops_at_first_success() {
    let executor = RecordingExecutor::new().fail_times(&["info"], 2);
    let readiness = ReadinessConfig {
        attempts: 15,
        interval: Duration::from_millis(1),
    };
    let mut diag = Diagnostics::default();

    let outcome =
        wait_until_ready(&executor, &DockerCli::new("docker"), &readiness, &mut diag).await;

    assert_eq!(outcome, Readiness::Ready { attempt: 3 });
    assert_eq!(executor.calls(), vec!["info", "info", "info"]);
    assert!(!diag.has_warnings());
}

/// Test: polling gives up after the configured number of attempts.
#[tokio::test]
async fn readiness_gives_up_after_max_attempts() {
    let executor = RecordingExecutor::new().fail_on(&["info"]);
    let readiness = ReadinessConfig {
        attempts: 4,
        interval: Duration::from_millis(1),
    };
    let mut diag = Diagnostics::default();

    let outcome =
        wait_until_ready(&executor, &DockerCli::new("docker"), &readiness, &mut diag).await;

    assert_eq!(outcome, Readiness::Unreachable { attempts: 4 });
    assert!(!outcome.is_ready());
    assert_eq!(executor.calls().len(), 4);
    assert!(diag.contains(WarningKind::DaemonUnreachable));
}
