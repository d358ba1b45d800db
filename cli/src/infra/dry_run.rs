//! Dry-run implementation of the remote session ports.
//!
//! Hands each shell line to an echo callback instead of sending it and
//! reports success, so a plan can be reviewed without credentials or network
//! access.

use anyhow::Result;

use crate::application::ports::{ExecOutcome, RemoteShell, SessionConnector};
use crate::domain::{ConnectionParams, RemoteCommand};

/// Connector that never touches the network.
pub struct DryRunConnector<'a> {
    echo: &'a dyn Fn(&str),
}

impl<'a> DryRunConnector<'a> {
    /// `echo` receives every rendered shell line, in order.
    #[must_use]
    pub fn new(echo: &'a dyn Fn(&str)) -> Self {
        Self { echo }
    }
}

impl<'a> SessionConnector for DryRunConnector<'a> {
    type Shell = DryRunShell<'a>;

    async fn connect(&self, params: &ConnectionParams) -> Result<DryRunShell<'a>> {
        tracing::debug!(destination = %params.destination(), "dry run, not connecting");
        Ok(DryRunShell { echo: self.echo })
    }
}

/// Shell that echoes commands.
pub struct DryRunShell<'a> {
    echo: &'a dyn Fn(&str),
}

impl RemoteShell for DryRunShell<'_> {
    async fn exec(&self, command: &RemoteCommand) -> Result<ExecOutcome> {
        (self.echo)(&command.shell_line());
        Ok(ExecOutcome::exited(0))
    }

    async fn close(self) -> Result<()> {
        Ok(())
    }
}
