//! Unit tests for the nginx, deploy and smoke-test runners.

#![allow(clippy::expect_used)]

use orc_deploy_cli::application::services::deploy_runner;
use orc_deploy_cli::domain::{
    DeployRequest, GitRef, ModeSet, NginxRequest, PathsConfig, SessionError, Target,
};

use crate::mocks::{RecordingConnector, RecordingReporter, params};

#[tokio::test]
async fn test_nginx_static_then_config() {
    let connector = RecordingConnector::default();
    let reporter = RecordingReporter::default();
    let req = NginxRequest {
        branch: "master".to_string(),
        git_ref: GitRef::default(),
        modes: ModeSet::parse("config-static").expect("valid mode"),
    };

    deploy_runner::nginx(&connector, &params(), &req, &PathsConfig::default(), &reporter)
        .await
        .expect("nginx succeeds");

    let lines = connector.lines();
    let static_at = lines
        .iter()
        .position(|l| l.contains("/var/www/prod/static"))
        .expect("static replaced");
    let config_at = lines
        .iter()
        .position(|l| l.contains("/etc/nginx/"))
        .expect("config copied");
    assert!(static_at < config_at);
    assert!(lines[0].ends_with("git fetch --all"));
}

#[tokio::test]
async fn test_nginx_config_test_failure_skips_reload() {
    let req = NginxRequest {
        branch: "staging".to_string(),
        git_ref: GitRef::default(),
        modes: ModeSet::parse("config").expect("valid mode"),
    };
    // fetch, checkout, cp snippets, cp sites-available, nginx -t
    let connector = RecordingConnector::failing_at(4, 1);
    let reporter = RecordingReporter::default();

    let err = deploy_runner::nginx(&connector, &params(), &req, &PathsConfig::default(), &reporter)
        .await
        .expect_err("nginx -t fails");

    assert!(connector.lines().iter().all(|l| !l.contains("systemctl")));
    assert_eq!(
        err.downcast_ref::<SessionError>().map(SessionError::exit_code),
        Some(1)
    );
}

#[tokio::test]
async fn test_deploy_with_no_commands_warns() {
    let connector = RecordingConnector::default();
    let reporter = RecordingReporter::default();
    let req = DeployRequest {
        target: Target::Staging,
        git_ref: GitRef::default(),
        modes: ModeSet::default(),
    };

    let ran = deploy_runner::deploy(&connector, &params(), &req, &PathsConfig::default(), &reporter)
        .await
        .expect("empty deploy succeeds");

    assert_eq!(ran, 0);
    assert!(
        reporter
            .warnings
            .lock()
            .expect("lock")
            .iter()
            .any(|w| w.contains("no commands"))
    );
}

#[tokio::test]
async fn test_deploy_staging_uses_staging_root() {
    let connector = RecordingConnector::default();
    let reporter = RecordingReporter::default();
    let req = DeployRequest {
        target: Target::Staging,
        git_ref: GitRef::parse("feature/x").expect("valid ref"),
        modes: ModeSet::parse("fetch_co").expect("valid mode"),
    };

    deploy_runner::deploy(&connector, &params(), &req, &PathsConfig::default(), &reporter)
        .await
        .expect("deploy succeeds");

    assert_eq!(
        connector.lines(),
        vec![
            "cd ~/ilcm/orc_staging && git fetch --all".to_string(),
            "cd ~/ilcm/orc_staging && git checkout feature/x".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_smoke_test_on_production() {
    let connector = RecordingConnector::default();
    let reporter = RecordingReporter::default();

    let ran = deploy_runner::smoke_test(
        &connector,
        &params(),
        Target::Production,
        &PathsConfig::default(),
        &reporter,
    )
    .await
    .expect("smoke test succeeds");

    assert_eq!(ran, 2);
    assert!(connector.lines()[0].starts_with("cd ~/ilcm/orc && "));
}
