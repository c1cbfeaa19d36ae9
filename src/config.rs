//! Runtime configuration
//!
//! Loaded once at startup from a YAML file, then overlaid with environment
//! variables (`JIRA_BASE_URL`, `CONFLUENCE_API_TOKEN`, ...). The resulting
//! [`Config`] is passed by reference to everything that needs it.
//!
//! ```yaml
//! output_dir: data
//! page_size: 50
//! jira:
//!   base_url: https://example.atlassian.net
//!   username: me@example.com
//!   api_token: xxxx
//! confluence:
//!   base_url: https://example.atlassian.net/wiki
//!   personal_access_token: xxxx
//! ```

use crate::error::{Error, Result};
use crate::types::Source;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Config file read when none is given on the command line
pub const DEFAULT_CONFIG_FILE: &str = "collab-extract.yaml";

/// Default number of items requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 50;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory snapshots are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Items requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Issue tracker connection
    #[serde(default)]
    pub jira: Option<SourceConfig>,

    /// Wiki connection
    #[serde(default)]
    pub confluence: Option<SourceConfig>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
            jira: None,
            confluence: None,
        }
    }
}

impl Config {
    /// Parse a config from YAML text
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml(&text)
    }

    /// Load config for the process: file, then environment, then validation.
    ///
    /// An explicitly given file must exist. The default file is optional so
    /// that a purely environment-driven setup works.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load), reading variables through `lookup`
    pub fn load_with_env<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };
        config.apply_env(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for source in Source::ALL {
            let prefix = source.env_prefix();
            let var = |name: &str| lookup(&format!("{prefix}_{name}"));

            let base_url = var("BASE_URL");
            let username = var("USERNAME");
            let api_token = var("API_TOKEN");
            let password = var("PASSWORD");
            let pat = var("PERSONAL_ACCESS_TOKEN");

            let any = [&base_url, &username, &api_token, &password, &pat]
                .iter()
                .any(|v| v.is_some());
            if !any {
                continue;
            }

            let slot = self.source_mut(source);
            let entry = slot.get_or_insert_with(SourceConfig::default);
            if let Some(v) = base_url {
                entry.base_url = v;
            }
            if username.is_some() {
                entry.username = username;
            }
            if api_token.is_some() {
                entry.api_token = api_token;
            }
            if password.is_some() {
                entry.password = password;
            }
            if pat.is_some() {
                entry.personal_access_token = pat;
            }
        }
    }

    /// Check values that would otherwise fail at request time
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than 0"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_value(
                "timeout_secs",
                "must be greater than 0",
            ));
        }
        for source in Source::ALL {
            if let Some(cfg) = self.source(source) {
                cfg.validate(source)?;
            }
        }
        Ok(())
    }

    /// Connection settings for a source, if configured
    pub fn source(&self, source: Source) -> Option<&SourceConfig> {
        match source {
            Source::Jira => self.jira.as_ref(),
            Source::Confluence => self.confluence.as_ref(),
        }
    }

    fn source_mut(&mut self, source: Source) -> &mut Option<SourceConfig> {
        match source {
            Source::Jira => &mut self.jira,
            Source::Confluence => &mut self.confluence,
        }
    }

    /// Connection settings for a source, or an error naming the missing section
    pub fn require_source(&self, source: Source) -> Result<&SourceConfig> {
        self.source(source)
            .ok_or_else(|| Error::missing_field(source.name()))
    }

    /// Sources that have a config section, in run order
    pub fn configured_sources(&self) -> Vec<Source> {
        Source::ALL
            .into_iter()
            .filter(|s| self.source(*s).is_some())
            .collect()
    }

    /// Directory a source's snapshots go to
    pub fn output_dir_for(&self, source: Source) -> PathBuf {
        self.source(source)
            .and_then(|s| s.output_dir.clone())
            .unwrap_or_else(|| self.output_dir.clone())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============================================================================
// Source Config
// ============================================================================

/// Connection settings for one source system
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Instance URL, e.g. `https://example.atlassian.net/wiki`
    #[serde(default)]
    pub base_url: String,

    /// Account name for basic auth
    #[serde(default)]
    pub username: Option<String>,

    /// API token, used as the basic auth password
    #[serde(default)]
    pub api_token: Option<String>,

    /// Password, used when no API token is set
    #[serde(default)]
    pub password: Option<String>,

    /// Personal access token, sent as a bearer credential
    #[serde(default)]
    pub personal_access_token: Option<String>,

    /// Overrides the global output directory for this source
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl SourceConfig {
    /// Root of the source's REST API
    pub fn api_url(&self, source: Source) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            source.api_root()
        )
    }

    fn validate(&self, source: Source) -> Result<()> {
        let field = format!("{}.base_url", source.name());
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_field(field));
        }

        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                field,
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        let has_pat = self
            .personal_access_token
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());
        let has_user = self
            .username
            .as_deref()
            .is_some_and(|u| !u.trim().is_empty());
        if !has_pat && !has_user {
            return Err(Error::missing_field(format!("{}.username", source.name())));
        }

        Ok(())
    }
}

impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "***");
        f.debug_struct("SourceConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("api_token", &redact(&self.api_token))
            .field("password", &redact(&self.password))
            .field(
                "personal_access_token",
                &redact(&self.personal_access_token),
            )
            .field("output_dir", &self.output_dir)
            .finish()
    }
}
