//! Document database.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::core::{CapabilityProvider, Database, DocumentFilter, Operation};
use crate::error::{StoreError, StoreResult};
use crate::types::DatabaseType;
use crate::types::entry::new_hash;

pub(super) const CAPABILITIES: &[Operation] = &[
    Operation::Get,
    Operation::Put,
    Operation::Del,
    Operation::Query,
];

/// Document field used as the index when none is configured.
pub const DEFAULT_INDEX_FIELD: &str = "_id";

/// A document database indexed by one document field.
///
/// Documents keep their first insertion position; re-putting a document
/// with an existing index replaces it in place.
pub struct DocumentDatabase {
    name: String,
    index_by: String,
    documents: RwLock<Vec<(String, Value)>>,
}

impl DocumentDatabase {
    /// Creates an empty document database indexed by `_id`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_index(name, DEFAULT_INDEX_FIELD)
    }

    /// Creates an empty document database indexed by `index_by`.
    pub fn with_index(name: impl Into<String>, index_by: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index_by: index_by.into(),
            documents: RwLock::new(Vec::new()),
        }
    }

    /// Returns the index field.
    pub fn index_by(&self) -> &str {
        &self.index_by
    }

    /// Returns the number of documents.
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    /// Returns true if there are no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    fn index_of(&self, doc: &Value) -> StoreResult<String> {
        match doc.get(&self.index_by) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            _ => Err(StoreError::invalid_input(
                &self.name,
                format!("document must have a string or number '{}' field", self.index_by),
            )),
        }
    }
}

impl CapabilityProvider for DocumentDatabase {
    fn capabilities(&self) -> &'static [Operation] {
        CAPABILITIES
    }
}

#[async_trait]
impl Database for DocumentDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    fn db_type(&self) -> DatabaseType {
        DatabaseType::DocStore
    }

    /// Returns every document whose index contains `key`, ignoring case.
    async fn get(&self, key: &str) -> StoreResult<Value> {
        let needle = key.to_lowercase();
        let matches = self
            .documents
            .read()
            .iter()
            .filter(|(index, _)| index.to_lowercase().contains(&needle))
            .map(|(_, doc)| doc.clone())
            .collect();
        Ok(Value::Array(matches))
    }

    async fn put(&self, doc: Value) -> StoreResult<Value> {
        if !doc.is_object() {
            return Err(StoreError::invalid_input(
                &self.name,
                "document must be a JSON object",
            ));
        }
        let index = self.index_of(&doc)?;
        debug!(database = %self.name, index = %index, "put document");

        let mut documents = self.documents.write();
        match documents.iter_mut().find(|(existing, _)| *existing == index) {
            Some(slot) => slot.1 = doc,
            None => documents.push((index, doc)),
        }
        Ok(Value::String(new_hash()))
    }

    async fn del(&self, key: &str) -> StoreResult<Value> {
        let mut documents = self.documents.write();
        let position = documents
            .iter()
            .position(|(index, _)| index == key)
            .ok_or_else(|| StoreError::item_not_found(&self.name, key))?;
        documents.remove(position);
        debug!(database = %self.name, index = %key, "deleted document");
        Ok(Value::String(new_hash()))
    }

    async fn query(&self, filter: DocumentFilter<'_>) -> StoreResult<Vec<Value>> {
        Ok(self
            .documents
            .read()
            .iter()
            .filter(|(_, doc)| filter(doc))
            .map(|(_, doc)| doc.clone())
            .collect())
    }
}
