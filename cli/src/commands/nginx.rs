//! `orc-deploy nginx`: update the load balancer's static files and config.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::{config_service, deploy_runner};
use crate::domain::plan::nginx_plan;
use crate::domain::{GitRef, ModeSet, NginxMode, NginxRequest};
use crate::infra::dry_run::DryRunConnector;
use crate::infra::ssh::SshConnector;
use crate::output::TerminalReporter;

/// Arguments for the nginx command.
#[derive(Args)]
pub struct NginxArgs {
    #[command(flatten)]
    pub remote: super::RemoteArgs,

    /// Load-balancer branch being deployed (master serves production)
    #[arg(short, long = "branch-name")]
    pub branch: String,

    /// Branch name or commit to check out in the load-balancer repository
    #[arg(short = 'r', long = "ref", default_value = "master")]
    pub git_ref: GitRef,

    /// Hyphen-separated tokens: static, config
    #[arg(short, long, default_value = "")]
    pub mode: ModeSet<NginxMode>,
}

/// Run the nginx command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, the session cannot be
/// opened, or a remote command fails.
pub async fn run(app: &AppContext, args: NginxArgs) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let req = NginxRequest {
        branch: args.branch,
        git_ref: args.git_ref,
        modes: args.mode,
    };

    if app.json {
        return super::print_plan_json(&nginx_plan(&req, &config.paths));
    }

    let params = args.remote.connection_params(app, &config.ssh)?;
    let reporter = TerminalReporter::new(&app.output);
    let ran = if app.dry_run {
        let echo = |line: &str| app.output.command(line);
        let dry_run = DryRunConnector::new(&echo);
        deploy_runner::nginx(&dry_run, &params, &req, &config.paths, &reporter).await?
    } else {
        deploy_runner::nginx(&SshConnector::new(), &params, &req, &config.paths, &reporter).await?
    };

    app.output
        .success(&format!("Load balancer updated ({ran} commands)"));
    Ok(ExitCode::SUCCESS)
}
