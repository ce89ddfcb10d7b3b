//! Append-only log databases: eventlog and feed.
//!
//! Both keep entries in insertion order. A feed additionally allows an entry
//! to be removed by hash.

use async_trait::async_trait;
use futures::StreamExt;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::core::{CapabilityProvider, Database, EntryStream, Operation};
use crate::error::{StoreError, StoreResult};
use crate::types::entry::new_hash;
use crate::types::{DatabaseType, IteratorOptions, LogEntry};

pub(super) const EVENTLOG_CAPABILITIES: &[Operation] =
    &[Operation::Get, Operation::Add, Operation::Iterator];

pub(super) const FEED_CAPABILITIES: &[Operation] = &[
    Operation::Get,
    Operation::Add,
    Operation::Remove,
    Operation::Iterator,
];

/// Shared entry storage for the log databases.
struct EntryLog {
    name: String,
    entries: RwLock<Vec<LogEntry>>,
}

impl EntryLog {
    fn new(name: String) -> Self {
        Self {
            name,
            entries: RwLock::new(Vec::new()),
        }
    }

    fn append(&self, value: Value) -> Value {
        let entry = LogEntry::add(value);
        let hash = entry.hash.clone();
        debug!(database = %self.name, hash = %hash, "append");
        self.entries.write().push(entry);
        Value::String(hash)
    }

    fn get(&self, hash: &str) -> StoreResult<Value> {
        let entries = self.entries.read();
        let entry = entries
            .iter()
            .find(|e| e.hash == hash)
            .ok_or_else(|| StoreError::item_not_found(&self.name, hash))?;
        serde_json::to_value(entry).map_err(|e| StoreError::Internal {
            backend_name: "memory".to_string(),
            message: e.to_string(),
            source: Some(Box::new(e)),
        })
    }

    fn remove(&self, hash: &str) -> StoreResult<Value> {
        let mut entries = self.entries.write();
        let position = entries
            .iter()
            .position(|e| e.hash == hash)
            .ok_or_else(|| StoreError::item_not_found(&self.name, hash))?;
        entries.remove(position);
        debug!(database = %self.name, hash = %hash, "remove");
        Ok(Value::String(new_hash()))
    }

    fn position_of(&self, entries: &[LogEntry], hash: &str) -> StoreResult<usize> {
        entries
            .iter()
            .position(|e| e.hash == hash)
            .ok_or_else(|| StoreError::item_not_found(&self.name, hash))
    }

    /// Selects entries for an iterator.
    ///
    /// Bounds narrow the log first, `limit` keeps the newest entries of the
    /// remaining range, and `reverse` flips the output to newest first.
    fn select(&self, options: &IteratorOptions) -> StoreResult<Vec<LogEntry>> {
        let entries = self.entries.read();

        let mut start = 0;
        let mut end = entries.len();
        if let Some(hash) = &options.gt {
            start = start.max(self.position_of(&entries, hash)? + 1);
        }
        if let Some(hash) = &options.gte {
            start = start.max(self.position_of(&entries, hash)?);
        }
        if let Some(hash) = &options.lt {
            end = end.min(self.position_of(&entries, hash)?);
        }
        if let Some(hash) = &options.lte {
            end = end.min(self.position_of(&entries, hash)? + 1);
        }
        if start >= end {
            return Ok(Vec::new());
        }

        let mut range = &entries[start..end];
        if let Some(limit) = options.effective_limit() {
            range = &range[range.len().saturating_sub(limit)..];
        }

        let mut selected = range.to_vec();
        if options.reverse {
            selected.reverse();
        }
        Ok(selected)
    }

    fn stream(&self, options: &IteratorOptions) -> StoreResult<EntryStream> {
        let selected = self.select(options)?;
        Ok(futures::stream::iter(selected.into_iter().map(Ok)).boxed())
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}

/// An append-only event log.
pub struct EventLogDatabase {
    log: EntryLog,
}

impl EventLogDatabase {
    /// Creates an empty event log.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            log: EntryLog::new(name.into()),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Returns true if the log has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CapabilityProvider for EventLogDatabase {
    fn capabilities(&self) -> &'static [Operation] {
        EVENTLOG_CAPABILITIES
    }
}

#[async_trait]
impl Database for EventLogDatabase {
    fn name(&self) -> &str {
        &self.log.name
    }

    fn db_type(&self) -> DatabaseType {
        DatabaseType::EventLog
    }

    async fn get(&self, hash: &str) -> StoreResult<Value> {
        self.log.get(hash)
    }

    async fn add(&self, value: Value) -> StoreResult<Value> {
        Ok(self.log.append(value))
    }

    async fn iterator(&self, options: IteratorOptions) -> StoreResult<EntryStream> {
        self.log.stream(&options)
    }
}

/// An append log whose entries can be removed.
pub struct FeedDatabase {
    log: EntryLog,
}

impl FeedDatabase {
    /// Creates an empty feed.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            log: EntryLog::new(name.into()),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Returns true if the feed has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CapabilityProvider for FeedDatabase {
    fn capabilities(&self) -> &'static [Operation] {
        FEED_CAPABILITIES
    }
}

#[async_trait]
impl Database for FeedDatabase {
    fn name(&self) -> &str {
        &self.log.name
    }

    fn db_type(&self) -> DatabaseType {
        DatabaseType::Feed
    }

    async fn get(&self, hash: &str) -> StoreResult<Value> {
        self.log.get(hash)
    }

    async fn add(&self, value: Value) -> StoreResult<Value> {
        Ok(self.log.append(value))
    }

    async fn remove(&self, hash: &str) -> StoreResult<Value> {
        self.log.remove(hash)
    }

    async fn iterator(&self, options: IteratorOptions) -> StoreResult<EntryStream> {
        self.log.stream(&options)
    }
}
