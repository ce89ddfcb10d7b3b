//! In-memory database manager.
//!
//! Everything lives in process memory and disappears with it. The manager
//! is the reference implementation of [`DatabaseManager`]: it caches one
//! handle per name, opens declared databases lazily, and creates new ones
//! on request.
//!
//! | Type | Operations |
//! |------|------------|
//! | `keyvalue` | get, put, del |
//! | `eventlog` | get, add, iterator |
//! | `feed` | get, add, remove, iterator |
//! | `docstore` | get, put, del, query |
//! | `counter` | inc |
//!
//! [`DatabaseManager`]: crate::core::DatabaseManager

mod counter;
mod docstore;
mod keyvalue;
mod log;
mod manager;

pub use counter::CounterDatabase;
pub use docstore::{DEFAULT_INDEX_FIELD, DocumentDatabase};
pub use keyvalue::KeyValueDatabase;
pub use log::{EventLogDatabase, FeedDatabase};
pub use manager::MemoryManager;

use crate::core::Operation;
use crate::types::DatabaseType;

/// Returns the operations a database type supports.
pub fn capabilities_for(db_type: DatabaseType) -> &'static [Operation] {
    match db_type {
        DatabaseType::KeyValue => keyvalue::CAPABILITIES,
        DatabaseType::EventLog => log::EVENTLOG_CAPABILITIES,
        DatabaseType::Feed => log::FEED_CAPABILITIES,
        DatabaseType::DocStore => docstore::CAPABILITIES,
        DatabaseType::Counter => counter::CAPABILITIES,
    }
}
