//! Key-value database.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::core::{CapabilityProvider, Database, Operation};
use crate::error::{StoreError, StoreResult};
use crate::types::DatabaseType;
use crate::types::entry::new_hash;

pub(super) const CAPABILITIES: &[Operation] = &[Operation::Get, Operation::Put, Operation::Del];

/// A key-value database.
///
/// `put` takes `{"key": ..., "value": ...}`. Deleting an absent key is not
/// an error.
pub struct KeyValueDatabase {
    name: String,
    values: RwLock<HashMap<String, Value>>,
}

impl KeyValueDatabase {
    /// Creates an empty key-value database.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl CapabilityProvider for KeyValueDatabase {
    fn capabilities(&self) -> &'static [Operation] {
        CAPABILITIES
    }
}

#[async_trait]
impl Database for KeyValueDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    fn db_type(&self) -> DatabaseType {
        DatabaseType::KeyValue
    }

    async fn get(&self, key: &str) -> StoreResult<Value> {
        self.values
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::item_not_found(&self.name, key))
    }

    async fn put(&self, body: Value) -> StoreResult<Value> {
        let key = match body.get("key") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                return Err(StoreError::invalid_input(
                    &self.name,
                    "put requires a string 'key'",
                ));
            }
        };
        let value = body.get("value").cloned().unwrap_or(Value::Null);

        debug!(database = %self.name, key = %key, "put");
        self.values.write().insert(key, value);
        Ok(Value::String(new_hash()))
    }

    async fn del(&self, key: &str) -> StoreResult<Value> {
        debug!(database = %self.name, key = %key, "del");
        self.values.write().remove(key);
        Ok(Value::String(new_hash()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_get_del() {
        let db = KeyValueDatabase::new("settings");

        db.put(json!({"key": "theme", "value": "dark"})).await.unwrap();
        assert_eq!(db.get("theme").await.unwrap(), json!("dark"));

        db.del("theme").await.unwrap();
        assert!(db.get("theme").await.unwrap_err().is_not_found());
        assert!(db.is_empty());
    }

    #[tokio::test]
    async fn test_put_requires_key() {
        let db = KeyValueDatabase::new("settings");
        let err = db.put(json!({"value": 1})).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_numeric_key() {
        let db = KeyValueDatabase::new("settings");
        db.put(json!({"key": 7, "value": true})).await.unwrap();
        assert_eq!(db.get("7").await.unwrap(), json!(true));
    }

    #[tokio::test]
    async fn test_del_absent_key_is_ok() {
        let db = KeyValueDatabase::new("settings");
        assert!(db.del("missing").await.is_ok());
    }

    #[tokio::test]
    async fn test_unsupported_add() {
        let db = KeyValueDatabase::new("settings");
        assert!(!db.supports(Operation::Add));
        assert!(db.add(json!(1)).await.is_err());
    }
}
