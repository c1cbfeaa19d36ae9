//! CLI commands and argument parsing

use crate::types::Source;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Snapshot Jira and Confluence collections into JSON files
#[derive(Parser, Debug)]
#[command(name = "collab-extract")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output directory, overrides the config file
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Items requested per page, overrides the config file
    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Extract every Jira endpoint
    Jira,

    /// Extract every Confluence endpoint
    Confluence,

    /// Search Jira issues with JQL and save them
    Issues {
        /// JQL query
        #[arg(long)]
        jql: String,

        /// Output file name
        #[arg(long, default_value = crate::catalog::ISSUES_OUTPUT_FILE)]
        file: String,
    },

    /// List cataloged endpoints
    Endpoints {
        /// Only this source
        #[arg(long)]
        source: Option<Source>,
    },
}
