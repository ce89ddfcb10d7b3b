//! The database manager trait.
//!
//! A manager opens, creates and caches databases by name. It is the only
//! owner of database handles: callers receive shared references and never
//! close them.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{DatabaseDescriptor, OpenOptions};

use super::database::DatabaseHandle;

/// Opens and tracks named databases.
///
/// Implementations must guarantee that a name maps to at most one live
/// handle at a time, even under concurrent resolution.
#[async_trait]
pub trait DatabaseManager: Send + Sync {
    /// Returns a human-readable name for this manager.
    fn backend_name(&self) -> &'static str;

    /// Lists every known database in manager-defined order.
    fn list(&self) -> Vec<DatabaseDescriptor>;

    /// Resolves a database name to a live handle, opening it if needed.
    ///
    /// # Errors
    ///
    /// * `StoreError::DatabaseNotFound` - unknown name and creation not allowed
    /// * `StoreError::Open` - the database could not be opened or created
    async fn resolve(&self, name: &str, options: OpenOptions) -> StoreResult<DatabaseHandle>;

    /// Describes a known database.
    ///
    /// # Errors
    ///
    /// * `StoreError::DatabaseNotFound` - unknown name
    fn describe(&self, name: &str) -> StoreResult<DatabaseDescriptor>;
}
