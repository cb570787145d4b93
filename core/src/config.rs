//! Client configuration and domain resolution.
//!
//! A Backlog space lives at `https://{space_id}{domain}` where the domain is
//! one of three fixed suffixes. Unknown or empty domains fall back to
//! `.backlog.jp` without an error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

pub const DOMAIN_JP: &str = ".backlog.jp";
pub const DOMAIN_COM: &str = ".backlog.com";
pub const DOMAIN_TOOL: &str = ".backlogtool.com";

pub const ENV_SPACE_ID: &str = "BACKLOG_SPACE_ID";
pub const ENV_API_KEY: &str = "BACKLOG_API_KEY";
pub const ENV_DOMAIN: &str = "BACKLOG_DOMAIN";

/// The hosting domain of a Backlog space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Domain {
    #[default]
    Jp,
    Com,
    Tool,
}

impl Domain {
    /// Map a configured suffix onto a known domain, defaulting to `Jp`.
    pub fn resolve(suffix: &str) -> Self {
        match suffix {
            DOMAIN_JP => Domain::Jp,
            DOMAIN_COM => Domain::Com,
            DOMAIN_TOOL => Domain::Tool,
            _ => Domain::default(),
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Domain::Jp => DOMAIN_JP,
            Domain::Com => DOMAIN_COM,
            Domain::Tool => DOMAIN_TOOL,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Credentials and location of a Backlog space.
///
/// `domain` is kept as the caller wrote it; it is resolved when the client is
/// built.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub space_id: String,
    pub api_key: String,
    #[serde(default)]
    pub domain: String,
}

impl Config {
    pub fn new(space_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            space_id: space_id.into(),
            api_key: api_key.into(),
            domain: String::new(),
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Read `BACKLOG_SPACE_ID`, `BACKLOG_API_KEY` and `BACKLOG_DOMAIN`.
    ///
    /// Missing variables become empty strings; `validate` reports them.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            space_id: lookup(ENV_SPACE_ID).unwrap_or_default(),
            api_key: lookup(ENV_API_KEY).unwrap_or_default(),
            domain: lookup(ENV_DOMAIN).unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.space_id.is_empty() {
            return Err(ApiError::configuration("space id not found"));
        }
        if self.api_key.is_empty() {
            return Err(ApiError::configuration("api key not found"));
        }
        Ok(())
    }

    pub fn resolved_domain(&self) -> Domain {
        Domain::resolve(&self.domain)
    }

    pub fn base_url(&self) -> String {
        format!("https://{}{}", self.space_id, self.resolved_domain())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("space_id", &self.space_id)
            .field("api_key", &"<redacted>")
            .field("domain", &self.domain)
            .finish()
    }
}
