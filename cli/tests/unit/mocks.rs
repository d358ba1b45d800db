//! Shared mock infrastructure for unit tests.
//!
//! A recording connector/shell pair that logs every session event and can be
//! told to fail authentication or a specific command.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::Result;
use orc_deploy_cli::application::ports::{
    ExecOutcome, ProgressReporter, RemoteShell, SessionConnector,
};
use orc_deploy_cli::domain::{ConnectionParams, RemoteCommand, SessionError, SshConfig};
use secrecy::SecretString;

/// Something that happened on a mocked session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Connected,
    Exec(String),
    Closed,
}

pub type Log = Arc<Mutex<Vec<Event>>>;

/// Connector whose sessions record into a shared log.
#[derive(Default)]
pub struct RecordingConnector {
    pub log: Log,
    /// Reject the password.
    pub reject_auth: bool,
    /// Make the command at this index (0-based) exit with the given code.
    pub fail_at: Option<(usize, u32)>,
    /// Make `close` return an error.
    pub fail_close: bool,
}

impl RecordingConnector {
    pub fn failing_at(index: usize, code: u32) -> Self {
        Self {
            fail_at: Some((index, code)),
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.lock().expect("log lock").clone()
    }

    /// Shell lines executed, in order.
    pub fn lines(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Exec(line) => Some(line),
                _ => None,
            })
            .collect()
    }
}

impl SessionConnector for RecordingConnector {
    type Shell = RecordingShell;

    async fn connect(&self, params: &ConnectionParams) -> Result<RecordingShell> {
        if self.reject_auth {
            return Err(SessionError::AuthenticationFailed {
                user: params.user.clone(),
                host: params.host.clone(),
            }
            .into());
        }
        self.log.lock().expect("log lock").push(Event::Connected);
        Ok(RecordingShell {
            log: Arc::clone(&self.log),
            fail_at: self.fail_at,
            fail_close: self.fail_close,
            count: Mutex::new(0),
        })
    }
}

pub struct RecordingShell {
    log: Log,
    fail_at: Option<(usize, u32)>,
    fail_close: bool,
    count: Mutex<usize>,
}

impl RemoteShell for RecordingShell {
    async fn exec(&self, command: &RemoteCommand) -> Result<ExecOutcome> {
        self.log
            .lock()
            .expect("log lock")
            .push(Event::Exec(command.shell_line()));
        let mut count = self.count.lock().expect("count lock");
        let index = *count;
        *count += 1;
        match self.fail_at {
            Some((at, code)) if at == index => Ok(ExecOutcome::exited(code)),
            _ => Ok(ExecOutcome::exited(0)),
        }
    }

    async fn close(self) -> Result<()> {
        self.log.lock().expect("log lock").push(Event::Closed);
        if self.fail_close {
            anyhow::bail!("connection reset during disconnect");
        }
        Ok(())
    }
}

/// Reporter that remembers banners and warnings.
#[derive(Default)]
pub struct RecordingReporter {
    pub steps: Mutex<Vec<String>>,
    pub warnings: Mutex<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.steps.lock().expect("lock").push(message.to_string());
    }
    fn success(&self, _: &str) {}
    fn warn(&self, message: &str) {
        self.warnings.lock().expect("lock").push(message.to_string());
    }
}

pub fn params() -> ConnectionParams {
    ConnectionParams::new(
        "10.0.0.1",
        SecretString::from("s3cret".to_string()),
        &SshConfig::default(),
    )
}
