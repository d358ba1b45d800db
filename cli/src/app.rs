//! Application context: unified state passed to every command handler.
//!
//! Constructed once in `Cli::run()` from the global flags so individual
//! command handlers only take `&AppContext` plus their own arguments.

use std::io::IsTerminal;

use anyhow::Result;
use secrecy::SecretString;

use crate::infra::config::YamlConfigStore;
use crate::output::OutputContext;

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Print commands instead of running them.
    pub dry_run: bool,
    /// Emit the plan as JSON (only with `dry_run`).
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Configuration file store.
    pub config_store: YamlConfigStore,
    /// Print commands instead of running them.
    pub dry_run: bool,
    /// Emit the plan as JSON.
    pub json: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &AppFlags) -> Self {
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            config_store: YamlConfigStore::new(),
            dry_run: flags.dry_run,
            json: flags.json,
        }
    }

    /// Resolve the session password.
    ///
    /// Uses `given` when present. Dry runs never need one. Otherwise the user
    /// is prompted without echo, which requires an interactive terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if no password was given and stdin is not a terminal,
    /// or if the prompt fails.
    pub fn password(&self, given: Option<String>) -> Result<SecretString> {
        if let Some(password) = given {
            return Ok(SecretString::from(password));
        }
        if self.dry_run {
            return Ok(SecretString::from(String::new()));
        }
        anyhow::ensure!(
            std::io::stdin().is_terminal(),
            "no password given; pass --password or run from a terminal"
        );
        let password = dialoguer::Password::new()
            .with_prompt("Remote password")
            .interact()?;
        Ok(SecretString::from(password))
    }
}
