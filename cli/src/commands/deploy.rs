//! `orc-deploy deploy`: deploy services onto the cluster.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::{config_service, deploy_runner};
use crate::domain::plan::deploy_plan;
use crate::domain::{DeployMode, DeployRequest, GitRef, ModeSet, Target};
use crate::infra::dry_run::DryRunConnector;
use crate::infra::ssh::SshConnector;
use crate::output::TerminalReporter;

/// Arguments for the deploy command.
#[derive(Args)]
pub struct DeployArgs {
    #[command(flatten)]
    pub remote: super::RemoteArgs,

    /// Deploy to staging instead of production
    #[arg(short, long)]
    pub staging: bool,

    /// Branch name or commit to check out (with the fetch_co token)
    #[arg(short = 'r', long = "ref", default_value = "master")]
    pub git_ref: GitRef,

    /// Hyphen-separated tokens: fetch_co, galleryapp, gallerytestapp,
    /// galleryconf, gallerytestconf, galleryarchives, jhubns, jhubtestns,
    /// bhubns, bhubtestns, bhubupgrade, prometheus, grafana
    #[arg(short, long, default_value = "")]
    pub mode: ModeSet<DeployMode>,
}

/// Run the deploy command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, the session cannot be
/// opened, or a remote command fails.
pub async fn run(app: &AppContext, args: DeployArgs) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let req = DeployRequest {
        target: Target::from_staging(args.staging),
        git_ref: args.git_ref,
        modes: args.mode,
    };

    if app.json {
        return super::print_plan_json(&deploy_plan(&req, &config.paths));
    }

    let params = args.remote.connection_params(app, &config.ssh)?;
    let reporter = TerminalReporter::new(&app.output);
    let ran = if app.dry_run {
        let echo = |line: &str| app.output.command(line);
        let dry_run = DryRunConnector::new(&echo);
        deploy_runner::deploy(&dry_run, &params, &req, &config.paths, &reporter).await?
    } else {
        deploy_runner::deploy(&SshConnector::new(), &params, &req, &config.paths, &reporter)
            .await?
    };

    app.output.success(&format!(
        "Deployment to {} finished ({ran} commands)",
        req.target.env_name()
    ));
    Ok(ExitCode::SUCCESS)
}
