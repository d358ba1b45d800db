//! Domain types and validators for orc-deploy configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "ssh.user",
    "ssh.port",
    "ssh.host_key_policy",
    "paths.production_root",
    "paths.staging_root",
    "paths.nginx_repo",
];
pub const VALID_HOST_KEY_POLICIES: &[&str] = &["strict", "accept-new", "insecure"];

pub const DEFAULT_USER: &str = "iuser";
pub const DEFAULT_PORT: u16 = 22;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.orc-deploy/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct OrcConfig {
    /// Connection settings.
    pub ssh: SshConfig,
    /// Remote directories.
    pub paths: PathsConfig,
}

/// How unknown or changed server host keys are handled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum HostKeyPolicy {
    /// Host must already be in `~/.ssh/known_hosts`.
    Strict,
    /// Unknown hosts are recorded; changed keys are rejected.
    #[default]
    AcceptNew,
    /// Any key is accepted.
    Insecure,
}

impl fmt::Display for HostKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Strict => "strict",
            Self::AcceptNew => "accept-new",
            Self::Insecure => "insecure",
        })
    }
}

impl FromStr for HostKeyPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "accept-new" => Ok(Self::AcceptNew),
            "insecure" => Ok(Self::Insecure),
            _ => Err(ConfigError::InvalidValue {
                key: "ssh.host_key_policy".to_string(),
                value: s.to_string(),
                valid: VALID_HOST_KEY_POLICIES.join(", "),
            }),
        }
    }
}

/// SSH connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SshConfig {
    /// Remote login user.
    pub user: String,
    /// Remote SSH port.
    pub port: u16,
    /// Host key verification policy.
    pub host_key_policy: HostKeyPolicy,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER.to_string(),
            port: DEFAULT_PORT,
            host_key_policy: HostKeyPolicy::default(),
        }
    }
}

/// Remote directories used by the deployment plans.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    /// Production checkout on the master node.
    pub production_root: String,
    /// Staging checkout on the master node.
    pub staging_root: String,
    /// Load-balancer config checkout on the nginx worker.
    pub nginx_repo: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            production_root: "~/ilcm/orc".to_string(),
            staging_root: "~/ilcm/orc_staging".to_string(),
            nginx_repo: "~/ilcm/orc_nginx/load_balancer".to_string(),
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    match key {
        "ssh.port" => {
            if !matches!(value.parse::<u16>(), Ok(p) if p != 0) {
                return Err(invalid(key, value, "1-65535"));
            }
        }
        "ssh.host_key_policy" => {
            value.parse::<HostKeyPolicy>()?;
        }
        _ => {
            if value.trim().is_empty() {
                return Err(invalid(key, value, "any non-empty string"));
            }
        }
    }
    Ok(())
}

fn invalid(key: &str, value: &str, valid: &str) -> anyhow::Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        valid: valid.to_string(),
    }
    .into()
}

impl OrcConfig {
    /// Apply a validated `key = value` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or value fails validation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "ssh.user" => self.ssh.user = value.to_string(),
            "ssh.port" => self.ssh.port = value.parse()?,
            "ssh.host_key_policy" => self.ssh.host_key_policy = value.parse()?,
            "paths.production_root" => self.paths.production_root = value.to_string(),
            "paths.staging_root" => self.paths.staging_root = value.to_string(),
            "paths.nginx_repo" => self.paths.nginx_repo = value.to_string(),
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
