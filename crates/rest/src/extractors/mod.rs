//! Axum extractors.
//!
//! - [`RequestBody`] - JSON or form body, empty meaning `{}`
//! - [`RequestParams`] - Body merged over the URL query parameters
//! - [`DbPath`] - Path parameters

pub mod body;
pub mod path;

pub use body::{RequestBody, RequestParams};
pub use path::DbPath;
