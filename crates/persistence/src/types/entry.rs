//! Log entries produced by append-only databases.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The operation recorded by a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryOp {
    /// Appended value.
    Add,
    /// Keyed write.
    Put,
    /// Keyed removal.
    Del,
}

/// The payload of a log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// Recorded operation.
    pub op: EntryOp,
    /// Key for keyed operations.
    pub key: Option<String>,
    /// Stored value.
    pub value: Value,
}

/// A single entry in a database log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Entry hash, unique within the database.
    pub hash: String,
    /// Entry payload.
    pub payload: Payload,
}

impl LogEntry {
    /// Creates an `ADD` entry with a fresh hash.
    pub fn add(value: Value) -> Self {
        Self {
            hash: new_hash(),
            payload: Payload {
                op: EntryOp::Add,
                key: None,
                value,
            },
        }
    }

    /// Consumes the entry, returning the stored value.
    pub fn into_value(self) -> Value {
        self.payload.value
    }
}

/// Generates a fresh entry hash.
pub(crate) fn new_hash() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
