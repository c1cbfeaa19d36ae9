//! HTTP client module
//!
//! A thin reqwest wrapper: base URL joining, default headers, credential
//! application and status classification. Requests are never retried; any
//! failure is returned to the caller as-is.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
