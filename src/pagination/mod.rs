//! Pagination module
//!
//! Supports the three "is there another page" conventions of the Jira and
//! Confluence REST APIs:
//!
//! - `isLast` boolean flag
//! - `total` count paired with the echoed offset (`startAt` / `start`)
//! - `_links.next` presence
//!
//! A response exposing none of them ends pagination after that page.

mod strategies;
mod types;

pub use strategies::{OffsetPaginator, SinglePagePaginator};
pub use types::{
    is_page_envelope, NextPage, PageParams, PaginationSignal, PaginationState, Paginator,
    SignalKind, StopReason, IS_LAST_FIELD, LINKS_FIELD, NEXT_LINK_FIELD, TOTAL_FIELD,
};
