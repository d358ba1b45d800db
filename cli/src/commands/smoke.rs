//! `orc-deploy test`: connectivity smoke test against the master node.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::{config_service, deploy_runner};
use crate::domain::Target;
use crate::domain::plan::smoke_test_plan;
use crate::infra::dry_run::DryRunConnector;
use crate::infra::ssh::SshConnector;
use crate::output::TerminalReporter;

/// Arguments for the test command.
#[derive(Args)]
pub struct SmokeArgs {
    #[command(flatten)]
    pub remote: super::RemoteArgs,

    /// Check the staging checkout instead of production
    #[arg(short, long)]
    pub staging: bool,
}

/// Run the smoke test.
///
/// # Errors
///
/// Returns an error if the session cannot be opened or either command fails.
pub async fn run(app: &AppContext, args: SmokeArgs) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let target = Target::from_staging(args.staging);

    if app.json {
        return super::print_plan_json(&smoke_test_plan(target, &config.paths));
    }

    let params = args.remote.connection_params(app, &config.ssh)?;
    let reporter = TerminalReporter::new(&app.output);
    if app.dry_run {
        let echo = |line: &str| app.output.command(line);
        let dry_run = DryRunConnector::new(&echo);
        deploy_runner::smoke_test(&dry_run, &params, target, &config.paths, &reporter)
            .await?;
    } else {
        deploy_runner::smoke_test(&SshConnector::new(), &params, target, &config.paths, &reporter)
            .await?;
        app.output
            .success(&format!("Reached {} as {}", params.host, params.user));
    }
    Ok(ExitCode::SUCCESS)
}
