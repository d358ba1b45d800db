//! Unit tests for the fail-fast executor.

#![allow(clippy::expect_used)]

use orc_deploy_cli::application::ports::SessionConnector;
use orc_deploy_cli::application::services::executor::{execute_plan, run_with_session};
use orc_deploy_cli::domain::plan::{deploy_plan, smoke_test_plan};
use orc_deploy_cli::domain::{
    DeployRequest, GitRef, ModeSet, PathsConfig, Plan, SessionError, Target,
};

use crate::mocks::{Event, RecordingConnector, RecordingReporter, params};

fn jhub_plan() -> Plan {
    let req = DeployRequest {
        target: Target::Production,
        git_ref: GitRef::default(),
        modes: ModeSet::parse("fetch_co-jhubns").expect("valid mode"),
    };
    deploy_plan(&req, &PathsConfig::default())
}

#[tokio::test]
async fn test_run_with_session_runs_all_commands_in_order() {
    let plan = jhub_plan();
    let connector = RecordingConnector::default();
    let reporter = RecordingReporter::default();

    let ran = run_with_session(&connector, &params(), &plan, &reporter)
        .await
        .expect("plan succeeds");

    assert_eq!(ran, plan.commands().count());
    assert_eq!(connector.lines(), plan.lines());
    let events = connector.events();
    assert_eq!(events.first(), Some(&Event::Connected));
    assert_eq!(events.last(), Some(&Event::Closed));
}

#[tokio::test]
async fn test_failure_stops_later_commands() {
    let plan = jhub_plan();
    let connector = RecordingConnector::failing_at(1, 128);
    let reporter = RecordingReporter::default();

    let err = run_with_session(&connector, &params(), &plan, &reporter)
        .await
        .expect_err("second command fails");

    assert_eq!(connector.lines(), plan.lines()[..2].to_vec());
    let session_err = err.downcast_ref::<SessionError>().expect("session error");
    assert!(matches!(
        session_err,
        SessionError::CommandFailed { exit_code: 128, .. }
    ));
    assert_eq!(session_err.exit_code(), 128);
}

#[tokio::test]
async fn test_session_closed_after_failure() {
    let plan = jhub_plan();
    let connector = RecordingConnector::failing_at(0, 1);
    let reporter = RecordingReporter::default();

    let _ = run_with_session(&connector, &params(), &plan, &reporter).await;

    assert_eq!(connector.events().last(), Some(&Event::Closed));
}

#[tokio::test]
async fn test_authentication_failure_runs_nothing() {
    let plan = jhub_plan();
    let connector = RecordingConnector {
        reject_auth: true,
        ..RecordingConnector::default()
    };
    let reporter = RecordingReporter::default();

    let err = run_with_session(&connector, &params(), &plan, &reporter)
        .await
        .expect_err("auth rejected");

    assert!(connector.events().is_empty());
    assert!(matches!(
        err.downcast_ref::<SessionError>(),
        Some(SessionError::AuthenticationFailed { .. })
    ));
    assert!(reporter.steps.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn test_banners_go_to_reporter_not_remote() {
    let plan = jhub_plan();
    let connector = RecordingConnector::default();
    let reporter = RecordingReporter::default();

    run_with_session(&connector, &params(), &plan, &reporter)
        .await
        .expect("plan succeeds");

    let steps = reporter.steps.lock().expect("lock").clone();
    assert_eq!(steps, vec!["Checking out master", "Deploying JupyterHub"]);
    assert!(connector.lines().iter().all(|l| !l.contains("Deploying")));
}

#[tokio::test]
async fn test_execute_plan_reports_skipped_tokens() {
    let req = DeployRequest {
        target: Target::Staging,
        git_ref: GitRef::default(),
        modes: ModeSet::parse("prometheus-grafana").expect("valid mode"),
    };
    let plan = deploy_plan(&req, &PathsConfig::default());
    let connector = RecordingConnector::default();
    let reporter = RecordingReporter::default();

    let ran = run_with_session(&connector, &params(), &plan, &reporter)
        .await
        .expect("empty plan succeeds");

    assert_eq!(ran, 0);
    let warnings = reporter.warnings.lock().expect("lock").clone();
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].contains("prometheus"));
}

#[tokio::test]
async fn test_execute_plan_counts_only_commands() {
    let plan = smoke_test_plan(Target::Staging, &PathsConfig::default());
    let connector = RecordingConnector::default();
    let reporter = RecordingReporter::default();
    let shell = connector.connect(&params()).await.expect("connect");

    let ran = execute_plan(&shell, &plan, &reporter).await.expect("run");

    assert_eq!(ran, 2);
    assert_eq!(
        connector.lines(),
        vec![
            "cd ~/ilcm/orc_staging && pwd".to_string(),
            "cd ~/ilcm/orc_staging && ls -alh".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_close_failure_after_success_keeps_result() {
    let plan = jhub_plan();
    let connector = RecordingConnector {
        fail_close: true,
        ..RecordingConnector::default()
    };
    let reporter = RecordingReporter::default();

    let ran = run_with_session(&connector, &params(), &plan, &reporter)
        .await
        .expect("completed plan stays successful");

    assert_eq!(ran, plan.commands().count());
    assert_eq!(connector.events().last(), Some(&Event::Closed));
}

#[tokio::test]
async fn test_close_failure_after_plan_failure_keeps_plan_error() {
    let plan = jhub_plan();
    let connector = RecordingConnector {
        fail_at: Some((2, 3)),
        fail_close: true,
        ..RecordingConnector::default()
    };
    let reporter = RecordingReporter::default();

    let err = run_with_session(&connector, &params(), &plan, &reporter)
        .await
        .expect_err("plan fails");

    assert!(matches!(
        err.downcast_ref::<SessionError>(),
        Some(SessionError::CommandFailed { exit_code: 3, .. })
    ));
}
