//! The database handle trait.
//!
//! A [`Database`] is an opened database owned by a manager. Each database
//! type implements only the operations listed in its capability set; every
//! other method keeps the default body, which fails with
//! [`StoreError::UnsupportedOperation`].

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::types::{DatabaseType, IteratorOptions, LogEntry};

use super::capabilities::{CapabilityProvider, Operation};

/// A document filter handed to [`Database::query`].
pub type DocumentFilter<'a> = &'a (dyn Fn(&Value) -> bool + Send + Sync);

/// A stream of log entries produced by [`Database::iterator`].
pub type EntryStream = BoxStream<'static, StoreResult<LogEntry>>;

/// A shared handle to an opened database.
///
/// Handles are owned by the manager's cache; callers only clone the `Arc`.
pub type DatabaseHandle = Arc<dyn Database>;

/// An opened database of some concrete type.
///
/// # Example
///
/// ```ignore
/// use orbitgate_persistence::core::{Database, Operation};
///
/// async fn read_or_default(db: &dyn Database, key: &str) -> serde_json::Value {
///     if db.supports(Operation::Get) {
///         db.get(key).await.unwrap_or_default()
///     } else {
///         serde_json::Value::Null
///     }
/// }
/// ```
#[async_trait]
pub trait Database: CapabilityProvider + Send + Sync {
    /// The database name.
    fn name(&self) -> &str;

    /// The database type tag.
    fn db_type(&self) -> DatabaseType;

    /// Reads by key (keyed stores) or entry hash (logs).
    async fn get(&self, key: &str) -> StoreResult<Value> {
        let _ = key;
        Err(StoreError::unsupported(self.db_type(), Operation::Get))
    }

    /// Keyed write. Returns the entry hash.
    async fn put(&self, body: Value) -> StoreResult<Value> {
        let _ = body;
        Err(StoreError::unsupported(self.db_type(), Operation::Put))
    }

    /// Appends a value. Returns the entry hash.
    async fn add(&self, value: Value) -> StoreResult<Value> {
        let _ = value;
        Err(StoreError::unsupported(self.db_type(), Operation::Add))
    }

    /// Increments a counter. `None` increments by one. Returns the entry hash.
    async fn inc(&self, amount: Option<Value>) -> StoreResult<Value> {
        let _ = amount;
        Err(StoreError::unsupported(self.db_type(), Operation::Inc))
    }

    /// Deletes by key. Returns the entry hash.
    async fn del(&self, key: &str) -> StoreResult<Value> {
        let _ = key;
        Err(StoreError::unsupported(self.db_type(), Operation::Del))
    }

    /// Removes an entry by hash. Returns the entry hash of the removal.
    async fn remove(&self, hash: &str) -> StoreResult<Value> {
        let _ = hash;
        Err(StoreError::unsupported(self.db_type(), Operation::Remove))
    }

    /// Returns every document accepted by `filter`, in storage order.
    async fn query(&self, filter: DocumentFilter<'_>) -> StoreResult<Vec<Value>> {
        let _ = filter;
        Err(StoreError::unsupported(self.db_type(), Operation::Query))
    }

    /// Opens an iterator over the log.
    async fn iterator(&self, options: IteratorOptions) -> StoreResult<EntryStream> {
        let _ = options;
        Err(StoreError::unsupported(self.db_type(), Operation::Iterator))
    }
}
