//! Typed mode flags.
//!
//! A mode flag is a hyphen-separated list of tokens (`static-config`,
//! `fetch_co-jhubns`). Each token enables one block of remote commands.
//! Blocks always run in declaration order, never in flag order.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::domain::error::ModeError;

/// A token that can appear in a mode flag.
pub trait ModeToken: Copy + Ord + Sized + 'static {
    /// Every token, in evaluation order.
    const ALL: &'static [Self];

    /// Spelling on the command line.
    fn name(self) -> &'static str;

    /// Look up a token by its spelling.
    #[must_use]
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }

    /// Comma-separated list of every valid spelling.
    #[must_use]
    fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Tokens accepted by `orc-deploy nginx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NginxMode {
    Static,
    Config,
}

impl ModeToken for NginxMode {
    const ALL: &'static [Self] = &[Self::Static, Self::Config];

    fn name(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Config => "config",
        }
    }
}

/// Tokens accepted by `orc-deploy deploy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeployMode {
    FetchCheckout,
    GalleryApp,
    GalleryTestApp,
    GalleryConf,
    GalleryTestConf,
    GalleryArchives,
    JhubNs,
    JhubTestNs,
    BhubNs,
    BhubTestNs,
    BhubUpgrade,
    Prometheus,
    Grafana,
}

impl DeployMode {
    /// Tokens that only ever act on production.
    #[must_use]
    pub fn production_only(self) -> bool {
        matches!(
            self,
            Self::GalleryArchives | Self::BhubUpgrade | Self::Prometheus | Self::Grafana
        )
    }
}

impl ModeToken for DeployMode {
    const ALL: &'static [Self] = &[
        Self::FetchCheckout,
        Self::GalleryApp,
        Self::GalleryTestApp,
        Self::GalleryConf,
        Self::GalleryTestConf,
        Self::GalleryArchives,
        Self::JhubNs,
        Self::JhubTestNs,
        Self::BhubNs,
        Self::BhubTestNs,
        Self::BhubUpgrade,
        Self::Prometheus,
        Self::Grafana,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::FetchCheckout => "fetch_co",
            Self::GalleryApp => "galleryapp",
            Self::GalleryTestApp => "gallerytestapp",
            Self::GalleryConf => "galleryconf",
            Self::GalleryTestConf => "gallerytestconf",
            Self::GalleryArchives => "galleryarchives",
            Self::JhubNs => "jhubns",
            Self::JhubTestNs => "jhubtestns",
            Self::BhubNs => "bhubns",
            Self::BhubTestNs => "bhubtestns",
            Self::BhubUpgrade => "bhubupgrade",
            Self::Prometheus => "prometheus",
            Self::Grafana => "grafana",
        }
    }
}

/// Set of tokens parsed from a mode flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSet<T: ModeToken> {
    tokens: BTreeSet<T>,
}

impl<T: ModeToken> Default for ModeSet<T> {
    fn default() -> Self {
        Self {
            tokens: BTreeSet::new(),
        }
    }
}

impl<T: ModeToken> ModeSet<T> {
    /// Parse a hyphen-separated flag, rejecting unknown tokens.
    ///
    /// Empty segments are skipped, so `""` yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::UnknownToken`] for the first token that is not a
    /// valid spelling.
    pub fn parse(flag: &str) -> Result<Self, ModeError> {
        let mut tokens = BTreeSet::new();
        for raw in flag.split('-').map(str::trim).filter(|s| !s.is_empty()) {
            let token = T::from_name(raw).ok_or_else(|| ModeError::UnknownToken {
                token: raw.to_string(),
                valid: T::valid_names(),
            })?;
            tokens.insert(token);
        }
        Ok(Self { tokens })
    }

    #[must_use]
    pub fn contains(&self, token: T) -> bool {
        self.tokens.contains(&token)
    }

    /// `true` when any of `tokens` is set.
    #[must_use]
    pub fn any(&self, tokens: &[T]) -> bool {
        tokens.iter().any(|t| self.contains(*t))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.tokens.iter().copied()
    }
}

impl<T: ModeToken> FromIterator<T> for ModeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl<T: ModeToken> FromStr for ModeSet<T> {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<T: ModeToken> fmt::Display for ModeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.iter().map(ModeToken::name).collect();
        f.write_str(&names.join("-"))
    }
}
