//! Auth configuration types

use crate::config::SourceConfig;
use std::fmt;

/// Authentication configuration resolved from a source's credentials
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// No authentication
    #[default]
    None,

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// API token or password
        password: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The personal access token
        token: String,
    },
}

impl AuthConfig {
    /// Pick the credential to use for a source.
    ///
    /// Precedence: personal access token (bearer), then API token, then
    /// password (both basic auth). Empty values count as absent.
    pub fn from_source(source: &SourceConfig) -> Self {
        if let Some(token) = non_empty(source.personal_access_token.as_deref()) {
            return Self::Bearer {
                token: token.to_string(),
            };
        }

        let username = non_empty(source.username.as_deref()).unwrap_or_default();
        let secret = non_empty(source.api_token.as_deref())
            .or_else(|| non_empty(source.password.as_deref()));

        match secret {
            Some(secret) => Self::Basic {
                username: username.to_string(),
                password: secret.to_string(),
            },
            None if !username.is_empty() => Self::Basic {
                username: username.to_string(),
                password: String::new(),
            },
            None => Self::None,
        }
    }

    /// Short name of the scheme, safe to log
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic { .. } => "basic",
            Self::Bearer { .. } => "bearer",
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"***").finish(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
