//! Connection parameters for the remote session.

use std::fmt;

use secrecy::SecretString;

use crate::domain::config::{HostKeyPolicy, SshConfig};

/// Everything needed to open one authenticated session.
///
/// Built once per invocation and never mutated.
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    /// Login password, reused to answer `sudo` prompts.
    pub password: SecretString,
    pub host_key_policy: HostKeyPolicy,
}

impl ConnectionParams {
    /// Combine a host and password with the configured SSH settings.
    #[must_use]
    pub fn new(host: &str, password: SecretString, ssh: &SshConfig) -> Self {
        Self {
            host: host.to_string(),
            port: ssh.port,
            user: ssh.user.clone(),
            password,
            host_key_policy: ssh.host_key_policy,
        }
    }

    /// `user@host:port`, for logs and messages.
    #[must_use]
    pub fn destination(&self) -> String {
        format!("{}@{}:{}", self.user, self.host, self.port)
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("host_key_policy", &self.host_key_policy)
            .finish()
    }
}
