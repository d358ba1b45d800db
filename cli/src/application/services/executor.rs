//! Application service: fail-fast plan execution.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::Result;

use crate::application::ports::{ProgressReporter, RemoteShell, SessionConnector};
use crate::domain::{ConnectionParams, Plan, SessionError, Step};

/// Run every step of `plan` in order on an open session.
///
/// Banners go to the reporter. The first command that does not exit with `0`
/// stops the plan; nothing after it runs. Returns the number of commands run.
///
/// # Errors
///
/// Returns [`SessionError::CommandFailed`] or [`SessionError::NoExitStatus`]
/// for the first failing command, or the transport error from the shell.
pub async fn execute_plan(
    shell: &impl RemoteShell,
    plan: &Plan,
    reporter: &impl ProgressReporter,
) -> Result<usize> {
    for token in &plan.skipped {
        reporter.warn(&format!("'{token}' only applies to production, skipped"));
    }

    let mut ran = 0;
    for step in &plan.steps {
        match step {
            Step::Banner(text) => reporter.step(text),
            Step::Run(cmd) => {
                tracing::debug!(command = %cmd.display_line(), privileged = cmd.privileged, "dispatching");
                let outcome = shell.exec(cmd).await?;
                ran += 1;
                match outcome.exit_code {
                    Some(0) => {}
                    Some(exit_code) => {
                        tracing::info!(exit_code, command = %cmd.display_line(), "remote command failed");
                        return Err(SessionError::CommandFailed {
                            command: cmd.display_line(),
                            exit_code,
                        }
                        .into());
                    }
                    None => {
                        return Err(SessionError::NoExitStatus {
                            command: cmd.display_line(),
                        }
                        .into());
                    }
                }
            }
        }
    }
    Ok(ran)
}

/// Open one session, run `plan` on it, and close it again.
///
/// The session is closed whether or not the plan succeeds. A failure to close
/// is only logged: the plan's own outcome is what gets returned.
///
/// # Errors
///
/// Returns the connection error or the first plan failure.
pub async fn run_with_session(
    connector: &impl SessionConnector,
    params: &ConnectionParams,
    plan: &Plan,
    reporter: &impl ProgressReporter,
) -> Result<usize> {
    let shell = connector.connect(params).await?;
    tracing::info!(destination = %params.destination(), "session open");

    let result = execute_plan(&shell, plan, reporter).await;
    if let Err(close_err) = shell.close().await {
        tracing::warn!(error = %close_err, "closing session");
    }
    result
}
