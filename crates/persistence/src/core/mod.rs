//! Core manager and database traits.
//!
//! - [`DatabaseManager`] - Resolves names to handles, lists and describes databases
//! - [`Database`] - An opened database exposing a subset of operations
//! - [`CapabilityProvider`], [`Operation`] - Runtime capability discovery
//!
//! # Backend Capabilities
//!
//! Not all database types support all operations. Check support before
//! invoking:
//!
//! ```ignore
//! use orbitgate_persistence::core::{CapabilityProvider, Operation};
//!
//! async fn delete(db: &dyn Database, key: &str) -> StoreResult<Value> {
//!     if db.supports(Operation::Del) {
//!         db.del(key).await
//!     } else {
//!         db.remove(key).await
//!     }
//! }
//! ```

pub mod capabilities;
pub mod database;
pub mod manager;

pub use capabilities::{CapabilityProvider, Operation};
pub use database::{Database, DatabaseHandle, DocumentFilter, EntryStream};
pub use manager::DatabaseManager;
