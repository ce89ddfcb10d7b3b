//! Orbitgate Persistence Layer
//!
//! This crate defines the collaborator interface the orbitgate HTTP facade
//! consumes: a [`DatabaseManager`](core::DatabaseManager) that resolves
//! database names to live handles, and the [`Database`](core::Database)
//! handle trait whose operations each concrete database type supports only
//! in part.
//!
//! # Architecture
//!
//! - [`types`] - Descriptors, open/iterator options and log entries
//! - [`error`] - Error types for all operations
//! - [`core`] - Manager and database traits, capability discovery
//! - [`backends`] - Manager implementations (in-memory)
//!
//! # Capabilities
//!
//! Database types name the same semantic operation differently. Every
//! handle advertises the exact set of operations it implements:
//!
//! ```
//! use orbitgate_persistence::backends::memory::FeedDatabase;
//! use orbitgate_persistence::core::{CapabilityProvider, Operation};
//!
//! let feed = FeedDatabase::new("posts");
//! assert!(feed.supports(Operation::Remove));
//! assert!(!feed.supports(Operation::Del));
//! ```

#![warn(missing_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod types;

pub use error::{StoreError, StoreResult};
