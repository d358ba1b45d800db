//! Application service: the three deploy runner operations.
//!
//! Each operation builds its plan from the request, opens a single session and
//! runs the plan fail-fast on it.

use anyhow::Result;

use crate::application::ports::{ProgressReporter, SessionConnector};
use crate::application::services::executor::run_with_session;
use crate::domain::plan::{deploy_plan, nginx_plan, smoke_test_plan};
use crate::domain::{ConnectionParams, DeployRequest, NginxRequest, PathsConfig, Target};

/// Update the load balancer: checkout, then static files and/or nginx config.
///
/// # Errors
///
/// Returns an error if the session cannot be opened or any command fails.
pub async fn nginx(
    connector: &impl SessionConnector,
    params: &ConnectionParams,
    req: &NginxRequest,
    paths: &PathsConfig,
    reporter: &impl ProgressReporter,
) -> Result<usize> {
    let plan = nginx_plan(req, paths);
    run_with_session(connector, params, &plan, reporter).await
}

/// Deploy the services selected by `req.modes` onto the cluster.
///
/// # Errors
///
/// Returns an error if the session cannot be opened or any command fails.
pub async fn deploy(
    connector: &impl SessionConnector,
    params: &ConnectionParams,
    req: &DeployRequest,
    paths: &PathsConfig,
    reporter: &impl ProgressReporter,
) -> Result<usize> {
    let plan = deploy_plan(req, paths);
    if plan.commands().next().is_none() {
        reporter.warn("Mode selects no commands for this target");
    }
    run_with_session(connector, params, &plan, reporter).await
}

/// Connectivity smoke test: `pwd` and `ls -alh` in the project root.
///
/// # Errors
///
/// Returns an error if the session cannot be opened or either command fails.
pub async fn smoke_test(
    connector: &impl SessionConnector,
    params: &ConnectionParams,
    target: Target,
    paths: &PathsConfig,
    reporter: &impl ProgressReporter,
) -> Result<usize> {
    let plan = smoke_test_plan(target, paths);
    run_with_session(connector, params, &plan, reporter).await
}
