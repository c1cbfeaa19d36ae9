//! Authentication module
//!
//! Supports: Basic (username + API token or password) and Bearer
//! (personal access token).

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
