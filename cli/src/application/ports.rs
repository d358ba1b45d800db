//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;

use anyhow::Result;

use crate::domain::{ConnectionParams, OrcConfig, RemoteCommand};

// ── Value Types ───────────────────────────────────────────────────────────────

/// Result of one remote command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Exit status reported by the remote end; `None` if the command was
    /// killed by a signal or the channel closed first.
    pub exit_code: Option<u32>,
}

impl ExecOutcome {
    #[must_use]
    pub fn exited(code: u32) -> Self {
        Self {
            exit_code: Some(code),
        }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

// ── Remote Session Ports ──────────────────────────────────────────────────────

/// An open, authenticated shell session on the remote host.
#[allow(async_fn_in_trait)]
pub trait RemoteShell {
    /// Run `command` to completion.
    ///
    /// Output is streamed to the local console as it arrives. Privileged
    /// commands have the session password written to their stdin.
    async fn exec(&self, command: &RemoteCommand) -> Result<ExecOutcome>;

    /// Close the session.
    async fn close(self) -> Result<()>;
}

/// Opens remote sessions.
#[allow(async_fn_in_trait)]
pub trait SessionConnector {
    type Shell: RemoteShell;

    /// Connect and authenticate. No command may run if this fails.
    async fn connect(&self, params: &ConnectionParams) -> Result<Self::Shell>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait: no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load configuration, falling back to defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<OrcConfig>;
    /// Persist configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, config: &OrcConfig) -> Result<()>;
    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
