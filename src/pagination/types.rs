//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Response field carrying the "this is the last page" flag
pub const IS_LAST_FIELD: &str = "isLast";

/// Response field carrying the total number of items
pub const TOTAL_FIELD: &str = "total";

/// Response object holding navigation links
pub const LINKS_FIELD: &str = "_links";

/// Key inside [`LINKS_FIELD`] present while another page exists
pub const NEXT_LINK_FIELD: &str = "next";

/// Query parameter names used to express offset and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    /// Offset parameter (also the field a server echoes back)
    pub offset: &'static str,
    /// Page size parameter
    pub limit: &'static str,
}

impl PageParams {
    /// Jira style: `startAt` / `maxResults`
    pub const START_AT: PageParams = PageParams {
        offset: "startAt",
        limit: "maxResults",
    };

    /// Confluence style: `start` / `limit`
    pub const START_LIMIT: PageParams = PageParams {
        offset: "start",
        limit: "limit",
    };
}

/// Kinds of "is there another page" signal a response can expose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// Boolean `isLast` flag
    IsLast,
    /// `total` count alongside the echoed offset
    TotalCount,
    /// `_links.next` presence
    NextLink,
}

/// A pagination signal read from one response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationSignal {
    /// `isLast` was present with this value
    IsLast(bool),
    /// `total` was present together with the echoed offset field
    Total {
        /// Total items on the server
        total: u64,
    },
    /// `_links` was present; the flag tells whether it held `next`
    NextLink(bool),
}

impl PaginationSignal {
    /// Read the strongest signal a body exposes.
    ///
    /// Precedence: `isLast: true`, then `total` + offset, then `_links.next`.
    /// `isLast: false` only counts when neither of the others is present.
    /// Returns `None` when the body carries none of them.
    pub fn detect(body: &Value, params: &PageParams) -> Option<Self> {
        let obj = body.as_object()?;
        let is_last = obj.get(IS_LAST_FIELD).and_then(Value::as_bool);

        if is_last == Some(true) {
            return Some(Self::IsLast(true));
        }

        if obj.contains_key(params.offset) {
            if let Some(total) = obj.get(TOTAL_FIELD).and_then(Value::as_u64) {
                return Some(Self::Total { total });
            }
        }

        if let Some(links) = obj.get(LINKS_FIELD).and_then(Value::as_object) {
            return Some(Self::NextLink(links.contains_key(NEXT_LINK_FIELD)));
        }

        is_last.map(Self::IsLast)
    }
}

/// Keys a page envelope may carry besides its item list
const ENVELOPE_FIELDS: &[&str] = &[
    IS_LAST_FIELD,
    TOTAL_FIELD,
    LINKS_FIELD,
    "startAt",
    "maxResults",
    "start",
    "limit",
    "size",
];

/// Whether a body is a page envelope: a non-empty object whose every key is
/// pagination metadata
pub fn is_page_envelope(body: &Value, params: &PageParams) -> bool {
    match body.as_object() {
        Some(obj) if !obj.is_empty() => obj.keys().all(|key| {
            ENVELOPE_FIELDS.contains(&key.as_str())
                || key == params.offset
                || key == params.limit
        }),
        _ => false,
    }
}

/// Why pagination stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `isLast` was true
    LastPage,
    /// Offset reached `total`
    TotalReached,
    /// `_links` present without `next`
    NoNextLink,
    /// A page with zero items while more were promised
    EmptyPage,
    /// Response exposed no pagination signal at all
    NoSignal,
    /// Endpoint is known to return one page only
    SinglePage,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopReason::LastPage => "last page flag",
            StopReason::TotalReached => "total reached",
            StopReason::NoNextLink => "no next link",
            StopReason::EmptyPage => "empty page",
            StopReason::NoSignal => "no pagination signal",
            StopReason::SinglePage => "single page endpoint",
        };
        f.write_str(s)
    }
}

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available with these parameters
    Continue {
        /// Query parameters to add/replace
        query_params: HashMap<String, String>,
    },
    /// No more pages
    Done(StopReason),
}

impl NextPage {
    /// Create a continuation with query parameters
    pub fn with_params(params: HashMap<String, String>) -> Self {
        Self::Continue {
            query_params: params,
        }
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Current offset
    pub offset: u64,
    /// Pages processed so far
    pub pages: usize,
    /// Total items fetched so far
    pub total_fetched: u64,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Add offset
    pub fn add_offset(&mut self, amount: u64) {
        self.offset += amount;
    }

    /// Record one processed page and its item count
    pub fn add_page(&mut self, items: u64) {
        self.pages += 1;
        self.total_fetched += items;
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Query parameters for the request at the current state
    fn page_params(&self, state: &PaginationState) -> HashMap<String, String>;

    /// Process a response and determine if there's a next page
    fn process_response(
        &self,
        body: &Value,
        items_count: usize,
        state: &mut PaginationState,
    ) -> NextPage;
}
