//! Deployment targets and the values they template into commands.

use crate::domain::config::PathsConfig;

/// Where a deployment lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Production,
    Staging,
}

impl Target {
    /// Map the `--staging` flag to a target.
    #[must_use]
    pub fn from_staging(staging: bool) -> Self {
        if staging { Self::Staging } else { Self::Production }
    }

    #[must_use]
    pub fn is_staging(self) -> bool {
        self == Self::Staging
    }

    /// `production` or `staging`.
    #[must_use]
    pub fn env_name(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
        }
    }

    /// Suffix for release and namespace names (`jhub-test-ns`).
    #[must_use]
    pub fn dash_suffix(self) -> &'static str {
        match self {
            Self::Production => "",
            Self::Staging => "-test",
        }
    }

    /// Suffix for file names (`config_test.yaml`).
    #[must_use]
    pub fn underscore_suffix(self) -> &'static str {
        match self {
            Self::Production => "",
            Self::Staging => "_test",
        }
    }

    /// Remote checkout the deployment runs from.
    #[must_use]
    pub fn project_root(self, paths: &PathsConfig) -> &str {
        match self {
            Self::Production => &paths.production_root,
            Self::Staging => &paths.staging_root,
        }
    }
}

/// Resolve the `/var/www/<dir>` a load-balancer branch serves from.
///
/// `master` serves production; every other branch serves staging.
#[must_use]
pub fn web_root_for_branch(branch: &str) -> &'static str {
    if branch == "master" { "prod" } else { "staging" }
}
