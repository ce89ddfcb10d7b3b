//! Database descriptors.
//!
//! A [`DatabaseDescriptor`] is the read-only view of a named database that
//! the manager hands out for listing and description.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::Operation;

/// The concrete kind of a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseType {
    /// Key-value store.
    #[serde(rename = "keyvalue")]
    KeyValue,
    /// Append-only event log.
    #[serde(rename = "eventlog")]
    EventLog,
    /// Append log whose entries can be removed.
    #[serde(rename = "feed")]
    Feed,
    /// Document store indexed by a document field.
    #[serde(rename = "docstore")]
    DocStore,
    /// Monotonic counter.
    #[serde(rename = "counter")]
    Counter,
}

impl DatabaseType {
    /// All known database types.
    pub const ALL: [DatabaseType; 5] = [
        DatabaseType::KeyValue,
        DatabaseType::EventLog,
        DatabaseType::Feed,
        DatabaseType::DocStore,
        DatabaseType::Counter,
    ];

    /// Returns the wire tag for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseType::KeyValue => "keyvalue",
            DatabaseType::EventLog => "eventlog",
            DatabaseType::Feed => "feed",
            DatabaseType::DocStore => "docstore",
            DatabaseType::Counter => "counter",
        }
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DatabaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatabaseType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown database type '{}'", s))
    }
}

/// Descriptive information about a named database.
///
/// `name` is the unique key. The remaining fields are produced by the
/// manager and are never modified by the REST layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseDescriptor {
    /// Unique database name.
    pub name: String,

    /// Type tag.
    #[serde(rename = "type")]
    pub db_type: DatabaseType,

    /// Manager-assigned address.
    pub address: String,

    /// Whether a live handle currently exists.
    pub opened: bool,

    /// Backend operations supported by this database, sorted by name.
    pub capabilities: Vec<Operation>,

    /// Options the database was declared or opened with.
    pub options: Map<String, Value>,

    /// When the database was first registered with the manager.
    pub created_at: DateTime<Utc>,
}
