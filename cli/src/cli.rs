//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;
use crate::domain::SessionError;

/// Scripted deployments of the ORC services onto the cluster
#[derive(Parser)]
#[command(
    name = "orc-deploy",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Disable colored output (also honours `NO_COLOR`)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print the remote commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// With --dry-run, print the plan as JSON
    #[arg(long, global = true, requires = "dry_run")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Update the load balancer's static files and nginx config
    Nginx(commands::nginx::NginxArgs),

    /// Deploy services onto the cluster
    Deploy(commands::deploy::DeployArgs),

    /// Check connectivity to the master node
    Test(commands::smoke::SmokeArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            no_color,
            quiet,
            dry_run,
            json,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            no_color,
            quiet,
            dry_run,
            json,
        });
        match command {
            Command::Nginx(args) => commands::nginx::run(&app, args).await,
            Command::Deploy(args) => commands::deploy::run(&app, args).await,
            Command::Test(args) => commands::smoke::run(&app, args).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
        }
    }
}

fn session_error(err: &anyhow::Error) -> Option<&SessionError> {
    err.chain().find_map(|e| e.downcast_ref::<SessionError>())
}

/// Process exit code for a failed run.
///
/// A [`SessionError`] anywhere in the chain decides the code, so added
/// context never hides a remote command's exit status. Anything else is `1`.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    session_error(err).map_or(1, SessionError::exit_code)
}

/// `code` field of the `--json` error object.
#[must_use]
pub fn error_code_for(err: &anyhow::Error) -> &'static str {
    session_error(err).map_or("error", SessionError::code)
}
