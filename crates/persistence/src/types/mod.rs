//! Core types for the persistence layer.
//!
//! - [`DatabaseType`], [`DatabaseDescriptor`] - What a named database is
//! - [`OpenOptions`] - How a database should be resolved
//! - [`IteratorOptions`] - Range and ordering for log iteration
//! - [`LogEntry`], [`Payload`] - Entries yielded by append-only databases
//!
//! # Examples
//!
//! ```
//! use orbitgate_persistence::types::{DatabaseType, OpenOptions};
//! use serde_json::json;
//!
//! let options: OpenOptions = serde_json::from_value(json!({
//!     "dbname": "users",
//!     "type": "docstore",
//!     "indexBy": "email"
//! }))
//! .unwrap();
//!
//! let db_type: DatabaseType = options.db_type.as_deref().unwrap().parse().unwrap();
//! assert_eq!(db_type, DatabaseType::DocStore);
//! assert_eq!(options.metadata["indexBy"], "email");
//! ```

mod descriptor;
pub(crate) mod entry;
mod options;

pub use descriptor::{DatabaseDescriptor, DatabaseType};
pub use entry::{EntryOp, LogEntry, Payload};
pub use options::{IteratorOptions, OpenOptions};
