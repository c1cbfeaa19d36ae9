//! CLI runner - executes commands

use crate::catalog;
use crate::cli::commands::{Cli, Commands};
use crate::config::Config;
use crate::engine::{ExtractEngine, ExtractReport};
use crate::error::{Error, Result};
use crate::output::JsonWriter;
use crate::types::{Source, StringMap};
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
    /// Variables to read instead of the process environment
    env: Option<StringMap>,
}

impl Runner {
    /// Create a new runner reading the process environment
    pub fn new(cli: Cli) -> Self {
        Self { cli, env: None }
    }

    /// Create a runner that sees only the given environment variables
    pub fn with_env(cli: Cli, env: StringMap) -> Self {
        Self {
            cli,
            env: Some(env),
        }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            None => self.extract_all().await.map(|_| ()),
            Some(Commands::Jira) => self.extract(Source::Jira).await.map(|_| ()),
            Some(Commands::Confluence) => self.extract(Source::Confluence).await.map(|_| ()),
            Some(Commands::Issues { jql, file }) => self.issues(jql, file).await,
            Some(Commands::Endpoints { source }) => {
                self.list_endpoints(*source);
                Ok(())
            }
        }
    }

    /// Load configuration and apply command-line overrides
    pub fn load_config(&self) -> Result<Config> {
        let path = self.cli.config.as_deref();
        let mut config = match &self.env {
            Some(env) => Config::load_with_env(path, |key| env.get(key).cloned())?,
            None => Config::load(path)?,
        };
        if let Some(dir) = &self.cli.output {
            config.output_dir.clone_from(dir);
            for source in [&mut config.jira, &mut config.confluence].into_iter().flatten() {
                source.output_dir = None;
            }
        }
        if let Some(page_size) = self.cli.page_size {
            config.page_size = page_size;
        }
        config.validate()?;
        Ok(config)
    }

    /// Extract every configured source
    pub async fn extract_all(&self) -> Result<ExtractReport> {
        let config = self.load_config()?;
        let sources = config.configured_sources();
        if sources.is_empty() {
            return Err(Error::config(
                "No source configured; add a jira or confluence section or set JIRA_BASE_URL / CONFLUENCE_BASE_URL",
            ));
        }

        let mut report = ExtractReport::default();
        for source in sources {
            report.merge(self.extract_source(&config, source).await?);
        }
        log_summary(&report);
        Ok(report)
    }

    /// Extract one source's catalog
    pub async fn extract(&self, source: Source) -> Result<ExtractReport> {
        let config = self.load_config()?;
        let report = self.extract_source(&config, source).await?;
        log_summary(&report);
        Ok(report)
    }

    async fn extract_source(&self, config: &Config, source: Source) -> Result<ExtractReport> {
        let engine = ExtractEngine::from_config(config, source)?;
        let writer = JsonWriter::new(config.output_dir_for(source));
        Ok(engine.run_catalog(catalog::catalog(source), &writer).await)
    }

    /// Run a JQL search; any failure is returned
    async fn issues(&self, jql: &str, file: &str) -> Result<()> {
        let config = self.load_config()?;
        let engine = ExtractEngine::from_config(&config, Source::Jira)?;
        let writer = JsonWriter::new(config.output_dir_for(Source::Jira));
        let (path, result) = engine.fetch_issues(jql, file, &writer).await?;
        println!("{} issues -> {}", result.len(), path.display());
        Ok(())
    }

    /// Print the catalog
    fn list_endpoints(&self, source: Option<Source>) {
        let sources: Vec<Source> = match source {
            Some(s) => vec![s],
            None => Source::ALL.to_vec(),
        };

        for source in sources {
            for endpoint in catalog::catalog(source) {
                println!(
                    "{:<40} {:<24} {}",
                    endpoint.id(),
                    endpoint.path,
                    endpoint.output_file
                );
            }
        }
    }
}

fn log_summary(report: &ExtractReport) {
    let stats = &report.stats;
    if report.all_succeeded() {
        info!(
            endpoints = stats.endpoints_written,
            items = stats.items_fetched,
            pages = stats.pages_fetched,
            duration_ms = stats.duration_ms,
            "Extraction complete"
        );
    } else {
        let failed: Vec<&str> = report.failures().map(|o| o.endpoint()).collect();
        warn!(
            written = stats.endpoints_written,
            failed = stats.endpoints_failed,
            endpoints = ?failed,
            "Extraction complete with failures"
        );
    }
}
