//! Pagination strategy implementations

use super::types::{
    NextPage, PageParams, PaginationSignal, PaginationState, Paginator, SignalKind, StopReason,
};
use serde_json::Value;
use std::collections::HashMap;

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset/limit pagination driven by whichever signal the response exposes.
///
/// The offset always advances by `page_size`, never by the number of items
/// actually returned.
#[derive(Debug, Clone)]
pub struct OffsetPaginator {
    /// Parameter names for offset and limit
    pub params: PageParams,
    /// Number of items requested per page
    pub page_size: u32,
    /// Signal the endpoint is known to use, if any
    pub expect: Option<SignalKind>,
}

impl OffsetPaginator {
    /// Create a new offset paginator
    pub fn new(params: PageParams, page_size: u32) -> Self {
        Self {
            params,
            page_size,
            expect: None,
        }
    }

    /// Declare the signal this endpoint uses
    #[must_use]
    pub fn expecting(mut self, kind: Option<SignalKind>) -> Self {
        self.expect = kind;
        self
    }

    fn advance(&self, state: &mut PaginationState) -> NextPage {
        state.add_offset(u64::from(self.page_size));
        NextPage::with_params(self.page_params(state))
    }
}

impl Paginator for OffsetPaginator {
    fn page_params(&self, state: &PaginationState) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert(self.params.offset.to_string(), state.offset.to_string());
        params.insert(self.params.limit.to_string(), self.page_size.to_string());
        params
    }

    fn process_response(
        &self,
        body: &Value,
        items_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_page(items_count as u64);

        match PaginationSignal::detect(body, &self.params) {
            Some(PaginationSignal::IsLast(true)) => NextPage::Done(StopReason::LastPage),
            Some(PaginationSignal::Total { total }) => {
                state.add_offset(u64::from(self.page_size));
                if state.offset >= total {
                    NextPage::Done(StopReason::TotalReached)
                } else {
                    NextPage::with_params(self.page_params(state))
                }
            }
            Some(PaginationSignal::NextLink(false)) => NextPage::Done(StopReason::NoNextLink),
            // Only `isLast: false` or `_links.next` reach here; an empty page
            // still ends the loop
            Some(PaginationSignal::IsLast(false) | PaginationSignal::NextLink(true)) => {
                if items_count == 0 {
                    NextPage::Done(StopReason::EmptyPage)
                } else {
                    self.advance(state)
                }
            }
            None => match self.expect {
                Some(_) if items_count > 0 => self.advance(state),
                Some(_) => NextPage::Done(StopReason::EmptyPage),
                None => NextPage::Done(StopReason::NoSignal),
            },
        }
    }
}

// ============================================================================
// Single Page
// ============================================================================

/// One request, no pagination parameters
#[derive(Debug, Clone, Default)]
pub struct SinglePagePaginator;

impl Paginator for SinglePagePaginator {
    fn page_params(&self, _state: &PaginationState) -> HashMap<String, String> {
        HashMap::new()
    }

    fn process_response(
        &self,
        _body: &Value,
        items_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_page(items_count as u64);
        NextPage::Done(StopReason::SinglePage)
    }
}
