//! Response formatting.
//!
//! - [`ndjson`] - Streamed newline-delimited JSON

pub mod ndjson;

pub use ndjson::{NDJSON, ndjson_response, wants_ndjson};
