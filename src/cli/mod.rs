//! CLI module
//!
//! Command-line interface for running extractions.
//!
//! # Commands
//!
//! - *(none)* - Extract every configured source
//! - `jira` / `confluence` - Extract one source's catalog
//! - `issues` - Run a JQL search and save the matching issues
//! - `endpoints` - List cataloged endpoints

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
