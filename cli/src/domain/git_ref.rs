//! Git ref validation.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::RefError;

/// Branch names, tags and any revision expression (`HEAD~1`, `v1.0^{commit}`).
/// A leading `-` would be read as an option by `git checkout`, and whitespace
/// or control characters never belong in a ref.
pub static GIT_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Constant pattern, cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[^\-\s\p{Cc}][^\s\p{Cc}]*$").expect("valid regex")
});

pub const DEFAULT_REF: &str = "master";

/// A validated git ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRef(String);

impl GitRef {
    /// # Errors
    ///
    /// Returns [`RefError::Invalid`] if `s` is empty, starts with `-`, or holds
    /// whitespace or control characters.
    pub fn parse(s: &str) -> Result<Self, RefError> {
        if !GIT_REF_RE.is_match(s) {
            return Err(RefError::Invalid(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for GitRef {
    fn default() -> Self {
        Self(DEFAULT_REF.to_string())
    }
}

impl FromStr for GitRef {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
