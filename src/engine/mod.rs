//! Execution engine module
//!
//! The paginated fetch loop and the batch runner around it.
//!
//! # Overview
//!
//! - [`ExtractEngine::fetch`] pages through one endpoint and returns every
//!   item it produced, or an error naming the endpoint
//! - [`ExtractEngine::run_catalog`] fetches a list of endpoints one after the
//!   other, writes each success and records each failure without stopping
//! - [`ExtractEngine::fetch_issues`] runs a JQL search and writes the result;
//!   its failure is returned to the caller

mod types;

pub use types::{EndpointOutcome, ExtractReport, ExtractStats, FetchResult};

use crate::auth::AuthConfig;
use crate::catalog::{EndpointDescriptor, JIRA_ISSUE_SEARCH};
use crate::config::{Config, SourceConfig};
use crate::decode::JsonDecoder;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::output::JsonWriter;
use crate::pagination::{NextPage, PaginationState, StopReason};
use crate::types::{Source, StringMap};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Drives extraction for one source system
#[derive(Debug)]
pub struct ExtractEngine {
    source: Source,
    client: HttpClient,
    page_size: u32,
}

impl ExtractEngine {
    /// Create an engine from an already configured client
    pub fn new(source: Source, client: HttpClient, page_size: u32) -> Self {
        Self {
            source,
            client,
            page_size,
        }
    }

    /// Build an engine for a source from the runtime config
    pub fn from_config(config: &Config, source: Source) -> Result<Self> {
        let source_config = config.require_source(source)?;
        Self::for_source(source, source_config, config)
    }

    /// Build an engine from one source's connection settings
    pub fn for_source(
        source: Source,
        source_config: &SourceConfig,
        config: &Config,
    ) -> Result<Self> {
        let auth = AuthConfig::from_source(source_config);
        debug!(%source, auth = auth.scheme(), "Building client");

        let http_config = HttpClientConfig::builder()
            .base_url(source_config.api_url(source))
            .timeout(config.timeout())
            .build();
        let client = HttpClient::with_auth(http_config, auth)?;
        Ok(Self::new(source, client, config.page_size))
    }

    /// Page through one endpoint until it is exhausted
    pub async fn fetch(&self, endpoint: &EndpointDescriptor) -> Result<FetchResult> {
        self.fetch_with_query(endpoint, &StringMap::new()).await
    }

    /// Page through one endpoint, sending extra fixed query parameters
    pub async fn fetch_with_query(
        &self,
        endpoint: &EndpointDescriptor,
        extra_query: &StringMap,
    ) -> Result<FetchResult> {
        let id = endpoint.id();
        self.fetch_pages(endpoint, extra_query)
            .await
            .map_err(|e| Error::endpoint(id, e))
    }

    async fn fetch_pages(
        &self,
        endpoint: &EndpointDescriptor,
        extra_query: &StringMap,
    ) -> Result<FetchResult> {
        let paginator = endpoint.paginator(self.page_size);
        let decoder = JsonDecoder::new(endpoint.items_key, endpoint.params);
        let mut state = PaginationState::new();
        let mut items = Vec::new();
        let mut page_params = paginator.page_params(&state);

        let stop = loop {
            let request = RequestConfig::new()
                .queries(extra_query.clone())
                .queries(page_params);
            let body = self.client.get_json(endpoint.path, request).await?;

            let page = decoder.extract_items(&body);
            let count = page.len();
            let offset = state.offset;
            items.extend(page);
            debug!(endpoint = %endpoint.id(), offset, items = count, "Fetched page");

            match paginator.process_response(&body, count, &mut state) {
                NextPage::Continue { query_params } => page_params = query_params,
                NextPage::Done(reason) => break reason,
            }
        };

        if stop == StopReason::NoSignal && !items.is_empty() {
            warn!(
                endpoint = %endpoint.id(),
                items = items.len(),
                "Response exposed no pagination signal; stopping, results may be truncated"
            );
        }

        Ok(FetchResult {
            items,
            pages: state.pages,
            stop,
        })
    }

    /// Fetch one endpoint and write its snapshot
    pub async fn extract(
        &self,
        endpoint: &EndpointDescriptor,
        writer: &JsonWriter,
    ) -> Result<(PathBuf, FetchResult)> {
        info!(endpoint = %endpoint.id(), path = endpoint.path, "Fetching");
        let result = self.fetch(endpoint).await?;
        let path = writer
            .write(endpoint.output_file, &result.items)
            .map_err(|e| Error::endpoint(endpoint.id(), e))?;
        info!(
            endpoint = %endpoint.id(),
            items = result.len(),
            pages = result.pages,
            path = %path.display(),
            "Saved"
        );
        Ok((path, result))
    }

    /// Fetch and write every endpoint in order.
    ///
    /// A failing endpoint is logged and recorded; the others still run.
    pub async fn run_catalog(
        &self,
        endpoints: &[EndpointDescriptor],
        writer: &JsonWriter,
    ) -> ExtractReport {
        let start = Instant::now();
        let mut report = ExtractReport::default();
        info!(source = %self.source, endpoints = endpoints.len(), "Starting extraction");

        for endpoint in endpoints {
            match self.extract(endpoint, writer).await {
                Ok((path, result)) => {
                    report.stats.add_written(result.len(), result.pages);
                    report.outcomes.push(EndpointOutcome::Written {
                        endpoint: endpoint.id(),
                        path,
                        items: result.len(),
                        pages: result.pages,
                    });
                }
                Err(e) => {
                    error!(endpoint = %endpoint.id(), error = %e, "Endpoint failed, skipping");
                    report.stats.add_failure();
                    report.outcomes.push(EndpointOutcome::Failed {
                        endpoint: endpoint.id(),
                        error: e.to_string(),
                    });
                }
            }
        }

        report.stats.set_duration(start.elapsed().as_millis() as u64);
        info!(
            source = %self.source,
            written = report.stats.endpoints_written,
            failed = report.stats.endpoints_failed,
            items = report.stats.items_fetched,
            "Finished extraction"
        );
        report
    }

    /// Run a JQL issue search and write the matching issues.
    ///
    /// Unlike [`run_catalog`](Self::run_catalog), any failure is returned.
    pub async fn fetch_issues(
        &self,
        jql: &str,
        output_file: &str,
        writer: &JsonWriter,
    ) -> Result<(PathBuf, FetchResult)> {
        if self.source != Source::Jira {
            return Err(Error::config(format!(
                "Issue search is only available for jira, not {}",
                self.source
            )));
        }

        info!(jql, "Fetching Jira issues");
        let mut query = StringMap::new();
        query.insert("jql".to_string(), jql.to_string());

        let result = self.fetch_with_query(&JIRA_ISSUE_SEARCH, &query).await?;
        let path = writer.write(output_file, &result.items)?;
        info!(issues = result.len(), path = %path.display(), "Saved Jira issues");
        Ok((path, result))
    }
}

#[cfg(test)]
mod tests;
