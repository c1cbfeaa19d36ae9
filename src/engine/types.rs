//! Engine types
//!
//! Fetch results, per-endpoint outcomes and run statistics.

use crate::pagination::StopReason;
use serde_json::Value;
use std::path::PathBuf;

/// Everything one endpoint returned, in server order
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    /// Accumulated items
    pub items: Vec<Value>,
    /// Requests issued
    pub pages: usize,
    /// Why paging ended
    pub stop: StopReason,
}

impl FetchResult {
    /// Number of accumulated items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no items were fetched
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// What happened to one endpoint in a batch run
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointOutcome {
    /// Fetched and written
    Written {
        /// Endpoint id (`source/name`)
        endpoint: String,
        /// Snapshot file
        path: PathBuf,
        /// Items written
        items: usize,
        /// Requests issued
        pages: usize,
    },
    /// Fetch or write failed; nothing was written
    Failed {
        /// Endpoint id (`source/name`)
        endpoint: String,
        /// Rendered error
        error: String,
    },
}

impl EndpointOutcome {
    /// Endpoint id
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Written { endpoint, .. } | Self::Failed { endpoint, .. } => endpoint,
        }
    }

    /// Check if this endpoint failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Result of a batch run over a catalog
#[derive(Debug, Clone, Default)]
pub struct ExtractReport {
    /// One outcome per endpoint, in run order
    pub outcomes: Vec<EndpointOutcome>,
    /// Aggregate counters
    pub stats: ExtractStats,
}

impl ExtractReport {
    /// Outcomes that failed
    pub fn failures(&self) -> impl Iterator<Item = &EndpointOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }

    /// Check if every endpoint was written
    pub fn all_succeeded(&self) -> bool {
        self.stats.endpoints_failed == 0
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: ExtractReport) {
        self.outcomes.extend(other.outcomes);
        self.stats.merge(&other.stats);
    }
}

/// Statistics from an extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Total items written
    pub items_fetched: usize,
    /// Total requests issued by successful endpoints
    pub pages_fetched: usize,
    /// Endpoints written
    pub endpoints_written: usize,
    /// Endpoints that failed
    pub endpoints_failed: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl ExtractStats {
    /// Record a written endpoint
    pub fn add_written(&mut self, items: usize, pages: usize) {
        self.endpoints_written += 1;
        self.items_fetched += items;
        self.pages_fetched += pages;
    }

    /// Record a failed endpoint
    pub fn add_failure(&mut self) {
        self.endpoints_failed += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }

    /// Add another run's counters
    pub fn merge(&mut self, other: &ExtractStats) {
        self.items_fetched += other.items_fetched;
        self.pages_fetched += other.pages_fetched;
        self.endpoints_written += other.endpoints_written;
        self.endpoints_failed += other.endpoints_failed;
        self.duration_ms += other.duration_ms;
    }
}
