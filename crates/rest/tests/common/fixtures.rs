//! Scripted databases for dispatch and failure tests.
//!
//! A [`ScriptedDatabase`] advertises whatever capability set a test gives
//! it, records every backend call and can be told to fail mid-iteration or
//! panic.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use orbitgate_persistence::core::{
    CapabilityProvider, Database, DatabaseHandle, DatabaseManager, EntryStream, Operation,
};
use orbitgate_persistence::error::{StoreError, StoreResult};
use orbitgate_persistence::types::{
    DatabaseDescriptor, DatabaseType, EntryOp, IteratorOptions, LogEntry, OpenOptions, Payload,
};
use serde_json::{Map, Value, json};

/// How a scripted iterator ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnding {
    /// All entries, then the end of the stream.
    Clean,
    /// All entries, then a backend error.
    FailAfterEntries,
}

/// A database whose behavior is fixed by the test.
pub struct ScriptedDatabase {
    name: String,
    db_type: DatabaseType,
    capabilities: &'static [Operation],
    values: Vec<Value>,
    ending: StreamEnding,
    panic_on_get: bool,
    calls: Mutex<Vec<Operation>>,
}

impl ScriptedDatabase {
    /// Creates a database advertising `capabilities`.
    pub fn new(name: &str, db_type: DatabaseType, capabilities: &'static [Operation]) -> Self {
        Self {
            name: name.to_string(),
            db_type,
            capabilities,
            values: Vec::new(),
            ending: StreamEnding::Clean,
            panic_on_get: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Sets the values the iterator yields.
    pub fn with_values(mut self, values: Vec<Value>, ending: StreamEnding) -> Self {
        self.values = values;
        self.ending = ending;
        self
    }

    /// Makes `get` panic.
    pub fn panicking_on_get(mut self) -> Self {
        self.panic_on_get = true;
        self
    }

    /// Returns the backend calls made so far.
    pub fn calls(&self) -> Vec<Operation> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: Operation) -> StoreResult<Value> {
        self.calls.lock().unwrap().push(operation);
        Ok(json!(format!("{}-hash", operation)))
    }
}

impl CapabilityProvider for ScriptedDatabase {
    fn capabilities(&self) -> &'static [Operation] {
        self.capabilities
    }
}

#[async_trait]
impl Database for ScriptedDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    fn db_type(&self) -> DatabaseType {
        self.db_type
    }

    async fn get(&self, key: &str) -> StoreResult<Value> {
        if self.panic_on_get {
            panic!("scripted panic reading {}", key);
        }
        self.record(Operation::Get)
    }

    async fn del(&self, _key: &str) -> StoreResult<Value> {
        self.record(Operation::Del)
    }

    async fn remove(&self, _hash: &str) -> StoreResult<Value> {
        self.record(Operation::Remove)
    }

    async fn iterator(&self, _options: IteratorOptions) -> StoreResult<EntryStream> {
        self.calls.lock().unwrap().push(Operation::Iterator);

        let mut items: Vec<StoreResult<LogEntry>> = self
            .values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                Ok(LogEntry {
                    hash: format!("entry-{}", i),
                    payload: Payload {
                        op: EntryOp::Add,
                        key: None,
                        value: value.clone(),
                    },
                })
            })
            .collect();
        if self.ending == StreamEnding::FailAfterEntries {
            items.push(Err(StoreError::Internal {
                backend_name: "scripted".to_string(),
                message: "replication peer went away".to_string(),
                source: None,
            }));
        }
        Ok(futures::stream::iter(items).boxed())
    }
}

/// A manager serving a fixed set of scripted databases.
#[derive(Default)]
pub struct ScriptedManager {
    databases: Vec<Arc<ScriptedDatabase>>,
}

impl ScriptedManager {
    /// Creates a manager serving `databases`, listed in the given order.
    pub fn new(databases: Vec<ScriptedDatabase>) -> Self {
        Self {
            databases: databases.into_iter().map(Arc::new).collect(),
        }
    }

    /// Returns the scripted database named `name`.
    pub fn database(&self, name: &str) -> Arc<ScriptedDatabase> {
        self.find(name).expect("unknown scripted database")
    }

    fn find(&self, name: &str) -> Option<Arc<ScriptedDatabase>> {
        self.databases.iter().find(|db| db.name == name).cloned()
    }

    fn descriptor(db: &ScriptedDatabase) -> DatabaseDescriptor {
        DatabaseDescriptor {
            name: db.name.clone(),
            db_type: db.db_type,
            address: format!("/scripted/{}", db.name),
            opened: true,
            capabilities: db.sorted_capabilities(),
            options: Map::new(),
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
impl DatabaseManager for ScriptedManager {
    fn backend_name(&self) -> &'static str {
        "scripted"
    }

    fn list(&self) -> Vec<DatabaseDescriptor> {
        self.databases.iter().map(|db| Self::descriptor(db)).collect()
    }

    async fn resolve(&self, name: &str, _options: OpenOptions) -> StoreResult<DatabaseHandle> {
        let db = self.find(name).ok_or_else(|| StoreError::DatabaseNotFound {
            name: name.to_string(),
        })?;
        Ok(db as DatabaseHandle)
    }

    fn describe(&self, name: &str) -> StoreResult<DatabaseDescriptor> {
        self.find(name)
            .map(|db| Self::descriptor(&db))
            .ok_or_else(|| StoreError::DatabaseNotFound {
                name: name.to_string(),
            })
    }
}

/// Operation counts by name, for readable assertions.
pub fn call_counts(calls: &[Operation]) -> HashMap<&'static str, usize> {
    let mut counts = HashMap::new();
    for call in calls {
        *counts.entry(call.as_str()).or_insert(0) += 1;
    }
    counts
}
