//! Output module
//!
//! Writes each finished collection as a pretty-printed JSON array, one file
//! per endpoint.

mod writer;

pub use writer::{read_snapshot, JsonWriter};
