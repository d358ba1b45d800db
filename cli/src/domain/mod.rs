//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod command;
pub mod config;
pub mod error;
pub mod git_ref;
pub mod mode;
pub mod plan;
pub mod session;
pub mod target;

pub use command::{RemoteCommand, Word};
pub use config::{HostKeyPolicy, OrcConfig, PathsConfig, SshConfig};
pub use error::{ConfigError, ModeError, RefError, SessionError};
pub use git_ref::GitRef;
pub use mode::{DeployMode, ModeSet, ModeToken, NginxMode};
pub use plan::{DeployRequest, NginxRequest, Plan, Step};
pub use session::ConnectionParams;
pub use target::Target;
