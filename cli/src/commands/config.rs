//! `orc-deploy config`: show and set configuration values.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read, validated, or written.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Path => {
            println!("{}", app.config_store.path()?.display());
            Ok(ExitCode::SUCCESS)
        }
        ConfigCommand::Set { key, value } => {
            config_service::set_value(&app.config_store, &key, &value)?;
            app.output.success(&format!("Set {key} = {value}"));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn show_config(app: &AppContext) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let path = app.config_store.path()?;
    let out = &app.output;

    out.header(&format!("Configuration ({})", path.display()));
    out.kv("ssh.user:", &config.ssh.user);
    out.kv("ssh.port:", &config.ssh.port.to_string());
    out.kv("ssh.host_key_policy:", &config.ssh.host_key_policy.to_string());
    out.kv("paths.production_root:", &config.paths.production_root);
    out.kv("paths.staging_root:", &config.paths.staging_root);
    out.kv("paths.nginx_repo:", &config.paths.nginx_repo);
    Ok(ExitCode::SUCCESS)
}
