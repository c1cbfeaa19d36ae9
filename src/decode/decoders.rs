//! JSON item extraction
//!
//! A page's items are found by trying, in order:
//!
//! 1. the endpoint's list key (`values`, `results`, `issues`)
//! 2. the body itself, when it is an array
//! 3. the whole body as one item
//!
//! An object whose every key is pagination metadata (for example
//! `{"isLast": true}`) is a page envelope with zero items, not an item.
//! Entities that merely carry `_links` or `total` are kept.

use crate::error::{Error, Result};
use crate::pagination::{is_page_envelope, PageParams};
use serde_json::Value;

/// Parse a response body as JSON
pub fn parse_body(body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))
}

/// JSON decoder keyed on one list field
#[derive(Debug, Clone)]
pub struct JsonDecoder {
    items_key: String,
    params: PageParams,
}

impl JsonDecoder {
    /// Create a decoder for the given list key and paging params
    pub fn new(items_key: impl Into<String>, params: PageParams) -> Self {
        Self {
            items_key: items_key.into(),
            params,
        }
    }

    /// Extract the page's items from a parsed body
    pub fn extract_items(&self, body: &Value) -> Vec<Value> {
        if let Some(items) = body.get(&self.items_key) {
            return match items {
                Value::Array(arr) => arr.clone(),
                Value::Null => Vec::new(),
                other => vec![other.clone()],
            };
        }

        match body {
            Value::Array(arr) => arr.clone(),
            _ if is_page_envelope(body, &self.params) => Vec::new(),
            _ => vec![body.clone()],
        }
    }
}
