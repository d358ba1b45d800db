//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Mode errors ───────────────────────────────────────────────────────────────

/// Errors raised while parsing a hyphen-separated mode flag.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModeError {
    #[error("Unknown mode token '{token}'.\n\nValid tokens: {valid}")]
    UnknownToken { token: String, valid: String },
}

// ── Ref errors ────────────────────────────────────────────────────────────────

/// Errors raised while validating a git ref.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RefError {
    #[error("Invalid git ref '{0}': must be non-empty, must not start with '-', and must not contain whitespace or control characters")]
    Invalid(String),
}

// ── Session errors ────────────────────────────────────────────────────────────

/// Errors raised by the remote session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Authentication failed for {user}@{host}.")]
    AuthenticationFailed { user: String, host: String },

    #[error("Host key for {host} was rejected. Check ~/.ssh/known_hosts or the ssh.host_key_policy setting.")]
    HostKeyRejected { host: String },

    #[error("Remote command failed with exit code {exit_code}: {command}")]
    CommandFailed { command: String, exit_code: u32 },

    #[error("Remote command was terminated before reporting an exit code: {command}")]
    NoExitStatus { command: String },
}

impl SessionError {
    /// Process exit code this error should surface as.
    ///
    /// A failing remote command passes its own code through; codes that do not
    /// fit a process exit status collapse to `1`.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::CommandFailed { exit_code, .. } => match u8::try_from(*exit_code) {
                Ok(0) | Err(_) => 1,
                Ok(code) => code,
            },
            _ => 1,
        }
    }

    /// Stable machine-readable tag for `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed { .. } => "auth",
            Self::HostKeyRejected { .. } => "host_key",
            Self::CommandFailed { .. } => "command_failed",
            Self::NoExitStatus { .. } => "no_exit_status",
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}
