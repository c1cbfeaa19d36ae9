//! Response decoder module
//!
//! Pulls the page's items out of a parsed JSON response body.

mod decoders;

pub use decoders::{parse_body, JsonDecoder};
