//! Database manager and backend implementations.
//!
//! # Available Backends
//!
//! | Backend | Description |
//! |---------|-------------|
//! | memory | In-process manager with keyvalue, eventlog, feed, docstore and counter databases |
//!
//! # Example
//!
//! ```
//! use orbitgate_persistence::backends::memory::MemoryManager;
//! use orbitgate_persistence::core::DatabaseManager;
//! use orbitgate_persistence::types::DatabaseType;
//!
//! let manager = MemoryManager::new();
//! manager.declare("events", DatabaseType::EventLog).unwrap();
//! assert_eq!(manager.list().len(), 1);
//! ```

pub mod memory;
