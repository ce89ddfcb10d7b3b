//! Backend operation names and capability sets.
//!
//! Database types name the same semantic operation differently (a keyed
//! store deletes with `del`, a feed with `remove`), so support is advertised
//! as an explicit set of [`Operation`]s rather than implied by the type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A backend-level operation a database may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// add - Append a value.
    Add,
    /// del - Delete by key.
    Del,
    /// get - Read by key or hash.
    Get,
    /// inc - Increment a counter.
    Inc,
    /// iterator - Walk the log.
    Iterator,
    /// put - Keyed write.
    Put,
    /// query - Filter documents with a predicate.
    Query,
    /// remove - Delete by entry hash.
    Remove,
}

impl Operation {
    /// Returns the operation name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Del => "del",
            Operation::Get => "get",
            Operation::Inc => "inc",
            Operation::Iterator => "iterator",
            Operation::Put => "put",
            Operation::Query => "query",
            Operation::Remove => "remove",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Anything that advertises a fixed set of supported operations.
pub trait CapabilityProvider {
    /// Returns the supported operations.
    fn capabilities(&self) -> &'static [Operation];

    /// Checks whether an operation is supported.
    fn supports(&self, operation: Operation) -> bool {
        self.capabilities().contains(&operation)
    }

    /// Returns the supported operations sorted by name.
    fn sorted_capabilities(&self) -> Vec<Operation> {
        let mut ops = self.capabilities().to_vec();
        ops.sort();
        ops
    }
}
