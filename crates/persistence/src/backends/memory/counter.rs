//! Counter database.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use crate::core::{CapabilityProvider, Database, Operation};
use crate::error::{StoreError, StoreResult};
use crate::types::DatabaseType;
use crate::types::entry::new_hash;

pub(super) const CAPABILITIES: &[Operation] = &[Operation::Inc];

/// A monotonic counter.
pub struct CounterDatabase {
    name: String,
    value: Mutex<u64>,
}

impl CounterDatabase {
    /// Creates a counter at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Mutex::new(0),
        }
    }

    /// Returns the current value.
    pub fn value(&self) -> u64 {
        *self.value.lock()
    }

    fn parse_amount(&self, amount: Option<Value>) -> StoreResult<u64> {
        match amount {
            None | Some(Value::Null) => Ok(1),
            Some(Value::Number(n)) => n.as_u64().ok_or_else(|| {
                StoreError::invalid_input(
                    &self.name,
                    format!("increment must be a non-negative integer, got {}", n),
                )
            }),
            Some(Value::String(s)) => s.trim().parse().map_err(|_| {
                StoreError::invalid_input(
                    &self.name,
                    format!("increment must be a non-negative integer, got '{}'", s),
                )
            }),
            Some(other) => Err(StoreError::invalid_input(
                &self.name,
                format!("increment must be a non-negative integer, got {}", other),
            )),
        }
    }
}

impl CapabilityProvider for CounterDatabase {
    fn capabilities(&self) -> &'static [Operation] {
        CAPABILITIES
    }
}

#[async_trait]
impl Database for CounterDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    fn db_type(&self) -> DatabaseType {
        DatabaseType::Counter
    }

    async fn inc(&self, amount: Option<Value>) -> StoreResult<Value> {
        let amount = self.parse_amount(amount)?;
        let mut value = self.value.lock();
        *value = value
            .checked_add(amount)
            .ok_or_else(|| StoreError::invalid_input(&self.name, "counter overflow"))?;
        debug!(database = %self.name, amount, value = *value, "inc");
        Ok(Value::String(new_hash()))
    }
}
