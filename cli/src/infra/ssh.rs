//! SSH implementation of the remote session ports.
//!
//! One `russh` connection per session; every command gets its own exec
//! channel on it. Remote stdout/stderr are copied to the local console as
//! they arrive.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use russh::client::{self, Handle};
use russh::keys::known_hosts::learn_known_hosts_path;
use russh::keys::{PublicKey, check_known_hosts_path};
use russh::{ChannelMsg, Disconnect};
use secrecy::{ExposeSecret, SecretString};
use tokio::io::AsyncWriteExt;

use crate::application::ports::{ExecOutcome, RemoteShell, SessionConnector};
use crate::domain::{ConnectionParams, HostKeyPolicy, RemoteCommand, SessionError};

/// SSH extended-data stream number for stderr.
const SSH_EXTENDED_DATA_STDERR: u32 = 1;

/// Verifies server host keys against a `known_hosts` file.
struct HostKeyVerifier {
    host: String,
    port: u16,
    policy: HostKeyPolicy,
    known_hosts: PathBuf,
}

impl HostKeyVerifier {
    /// Apply the policy to `key`. Unknown hosts are recorded under
    /// `accept-new`; a changed key is always refused unless `insecure`.
    fn verify(&self, key: &PublicKey) -> bool {
        if self.policy == HostKeyPolicy::Insecure {
            tracing::warn!(host = %self.host, "host key verification disabled");
            return true;
        }
        match check_known_hosts_path(&self.host, self.port, key, &self.known_hosts) {
            Ok(true) => true,
            Ok(false) if self.policy == HostKeyPolicy::AcceptNew => {
                tracing::info!(host = %self.host, "recording new host key");
                if let Err(e) = learn_known_hosts_path(&self.host, self.port, key, &self.known_hosts) {
                    tracing::warn!(error = %e, "cannot write known_hosts");
                }
                true
            }
            Ok(false) => {
                tracing::error!(host = %self.host, "host not in known_hosts");
                false
            }
            Err(e) => {
                tracing::error!(host = %self.host, error = %e, "host key check failed");
                false
            }
        }
    }
}

impl client::Handler for HostKeyVerifier {
    type Error = russh::Error;

    async fn check_server_key(&mut self, server_public_key: &PublicKey) -> Result<bool, Self::Error> {
        Ok(self.verify(server_public_key))
    }
}

/// Production `SessionConnector`: password-authenticated SSH.
#[derive(Default)]
pub struct SshConnector {
    config: Arc<client::Config>,
    known_hosts: Option<PathBuf>,
}

impl SshConnector {
    /// Connector that checks `~/.ssh/known_hosts`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Connector that checks host keys against `path` instead.
    #[must_use]
    pub fn with_known_hosts(path: PathBuf) -> Self {
        Self {
            known_hosts: Some(path),
            ..Self::default()
        }
    }

    fn known_hosts_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.known_hosts {
            return Ok(path.clone());
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".ssh").join("known_hosts"))
    }
}

impl SessionConnector for SshConnector {
    type Shell = SshSession;

    async fn connect(&self, params: &ConnectionParams) -> Result<SshSession> {
        let verifier = HostKeyVerifier {
            host: params.host.clone(),
            port: params.port,
            policy: params.host_key_policy,
            known_hosts: self.known_hosts_path()?,
        };

        tracing::debug!(destination = %params.destination(), "connecting");
        let mut handle = match client::connect(
            Arc::clone(&self.config),
            (params.host.as_str(), params.port),
            verifier,
        )
        .await
        {
            Ok(handle) => handle,
            Err(russh::Error::UnknownKey) => {
                return Err(SessionError::HostKeyRejected {
                    host: params.host.clone(),
                }
                .into());
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("cannot connect to {}:{}", params.host, params.port)));
            }
        };

        let auth = handle
            .authenticate_password(params.user.as_str(), params.password.expose_secret())
            .await
            .context("password authentication")?;
        if !auth.success() {
            return Err(SessionError::AuthenticationFailed {
                user: params.user.clone(),
                host: params.host.clone(),
            }
            .into());
        }

        Ok(SshSession {
            handle,
            password: SecretString::from(params.password.expose_secret().to_owned()),
        })
    }
}

/// An authenticated SSH connection.
pub struct SshSession {
    handle: Handle<HostKeyVerifier>,
    password: SecretString,
}

impl RemoteShell for SshSession {
    async fn exec(&self, command: &RemoteCommand) -> Result<ExecOutcome> {
        let line = command.shell_line();
        let mut channel = self
            .handle
            .channel_open_session()
            .await
            .context("cannot open session channel")?;
        channel
            .exec(true, line.as_str())
            .await
            .with_context(|| format!("cannot start: {}", command.display_line()))?;

        if command.privileged {
            let answer = format!("{}\n", self.password.expose_secret());
            channel
                .data(answer.as_bytes())
                .await
                .context("cannot answer sudo prompt")?;
        }
        channel.eof().await.context("cannot close remote stdin")?;

        let mut stdout = tokio::io::stdout();
        let mut stderr = tokio::io::stderr();
        let mut exit_code = None;

        while let Some(msg) = channel.wait().await {
            match msg {
                ChannelMsg::Data { ref data } => {
                    stdout.write_all(data).await.context("writing stdout")?;
                }
                ChannelMsg::ExtendedData { ref data, ext } if ext == SSH_EXTENDED_DATA_STDERR => {
                    stderr.write_all(data).await.context("writing stderr")?;
                }
                ChannelMsg::ExitStatus { exit_status } => exit_code = Some(exit_status),
                ChannelMsg::ExitSignal { signal_name, .. } => {
                    tracing::warn!(signal = ?signal_name, "remote command killed by signal");
                }
                _ => {}
            }
        }
        stdout.flush().await.context("writing stdout")?;
        stderr.flush().await.context("writing stderr")?;

        Ok(ExecOutcome { exit_code })
    }

    async fn close(self) -> Result<()> {
        self.handle
            .disconnect(Disconnect::ByApplication, "", "English")
            .await
            .context("disconnecting")
    }
}
