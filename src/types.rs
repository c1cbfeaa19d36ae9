//! Common types used throughout collab-extract

use serde::{Deserialize, Serialize};
use std::fmt;

/// Generic key-value map with string keys and values
pub type StringMap = std::collections::HashMap<String, String>;

// ============================================================================
// Source Systems
// ============================================================================

/// The remote system an endpoint belongs to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Issue tracker
    Jira,
    /// Wiki / content service
    Confluence,
}

impl Source {
    /// Every supported source, in run order
    pub const ALL: [Source; 2] = [Source::Jira, Source::Confluence];

    /// Lowercase name, used in logs, env prefixes and file names
    pub fn name(self) -> &'static str {
        match self {
            Source::Jira => "jira",
            Source::Confluence => "confluence",
        }
    }

    /// REST API root below the configured base URL
    pub fn api_root(self) -> &'static str {
        match self {
            Source::Jira => "rest/api/2",
            Source::Confluence => "rest/api",
        }
    }

    /// Prefix for environment variable overrides
    pub fn env_prefix(self) -> &'static str {
        match self {
            Source::Jira => "JIRA",
            Source::Confluence => "CONFLUENCE",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
