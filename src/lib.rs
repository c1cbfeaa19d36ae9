//! # collab-extract
//!
//! Snapshots Jira and Confluence REST collections into JSON files.
//!
//! Each cataloged endpoint is paged through until the server signals
//! exhaustion, and the accumulated items are written as one pretty-printed
//! JSON array per collection.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use collab_extract::{catalog, config::Config, engine::ExtractEngine, output::JsonWriter};
//! use collab_extract::types::Source;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> collab_extract::Result<()> {
//!     let config = Config::load(None)?;
//!     let engine = ExtractEngine::from_config(&config, Source::Jira)?;
//!     let writer = JsonWriter::new(config.output_dir_for(Source::Jira));
//!
//!     let report = engine.run_catalog(catalog::catalog(Source::Jira), &writer).await;
//!     println!("{} endpoints written", report.stats.endpoints_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  cli: Runner ── config ── catalog (static descriptors)   │
//! └──────────────────────────────┬───────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴───────────────────────────┐
//! │  engine: fetch loop, per-endpoint error boundary         │
//! ├──────────┬───────────┬──────────────┬──────────┬─────────┤
//! │   auth   │   http    │  pagination  │  decode  │ output  │
//! │ Basic    │ GET       │ isLast       │ list key │ JSON    │
//! │ Bearer   │ status    │ total+offset │ array    │ array   │
//! │          │ mapping   │ _links.next  │ object   │ files   │
//! └──────────┴───────────┴──────────────┴──────────┴─────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

/// Error types
pub mod error;

/// Common types
pub mod types;

/// Runtime configuration
pub mod config;

/// Authentication
pub mod auth;

/// HTTP client
pub mod http;

/// Pagination strategies
pub mod pagination;

/// Response item extraction
pub mod decode;

/// JSON snapshot output
pub mod output;

/// Static endpoint catalogs
pub mod catalog;

/// Fetch loop and batch runner
pub mod engine;

/// Command-line interface
pub mod cli;

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
