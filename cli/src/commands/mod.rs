//! Command implementations

pub mod config;
pub mod deploy;
pub mod nginx;
pub mod smoke;

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::domain::{ConnectionParams, Plan, SshConfig};

/// Connection flags shared by every remote command.
#[derive(Args)]
pub struct RemoteArgs {
    /// Remote host (master node or load-balancer worker)
    #[arg(short = 'H', long)]
    pub host: String,

    /// Remote password, also used for sudo (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Remote user [default: from config, iuser]
    #[arg(short, long)]
    pub user: Option<String>,

    /// SSH port [default: from config, 22]
    #[arg(long)]
    pub port: Option<u16>,
}

impl RemoteArgs {
    /// Merge the flags over the configured SSH settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the password cannot be resolved.
    pub fn connection_params(self, app: &AppContext, ssh: &SshConfig) -> Result<ConnectionParams> {
        let mut ssh = ssh.clone();
        if let Some(user) = self.user {
            ssh.user = user;
        }
        if let Some(port) = self.port {
            ssh.port = port;
        }
        let password = app.password(self.password)?;
        Ok(ConnectionParams::new(&self.host, password, &ssh))
    }
}

/// Print `plan` as JSON and stop.
fn print_plan_json(plan: &Plan) -> Result<ExitCode> {
    println!("{}", crate::output::json::format_plan(plan)?);
    Ok(ExitCode::SUCCESS)
}
