//! orc-deploy - scripted deployments of the ORC services onto the cluster

use std::process::ExitCode;

use clap::Parser;
use orc_deploy_cli::cli::{Cli, error_code_for, exit_code_for};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            let code = exit_code_for(&e);
            if json
                && let Ok(obj) =
                    orc_deploy_cli::output::json::format_error(&format!("{e:#}"), error_code_for(&e))
            {
                println!("{obj}");
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::from(code)
        }
    }
}
