//! The in-memory database manager.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::core::{CapabilityProvider, Database, DatabaseHandle, DatabaseManager};
use crate::error::{StoreError, StoreResult};
use crate::types::{DatabaseDescriptor, DatabaseType, OpenOptions};

use super::{
    CounterDatabase, DEFAULT_INDEX_FIELD, DocumentDatabase, EventLogDatabase, FeedDatabase,
    KeyValueDatabase, capabilities_for,
};

/// Address prefix for databases managed in memory.
const ADDRESS_PREFIX: &str = "/orbitgate";

/// A registered database, opened or not.
struct Registration {
    db_type: DatabaseType,
    options: Map<String, Value>,
    created_at: DateTime<Utc>,
    handle: Option<DatabaseHandle>,
}

#[derive(Default)]
struct Registry {
    /// Names in registration order.
    order: Vec<String>,
    entries: HashMap<String, Registration>,
}

/// In-memory [`DatabaseManager`].
///
/// Databases are registered either by [`MemoryManager::declare`] (opened
/// lazily on first resolve) or by a resolve that allows creation. Listing
/// follows registration order.
///
/// # Example
///
/// ```
/// use orbitgate_persistence::backends::memory::MemoryManager;
/// use orbitgate_persistence::core::DatabaseManager;
/// use orbitgate_persistence::types::OpenOptions;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let manager = MemoryManager::new();
/// let options = OpenOptions::default().or_create("feed");
/// let db = manager.resolve("posts", options).await?;
/// assert_eq!(db.name(), "posts");
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct MemoryManager {
    registry: RwLock<Registry>,
}

impl MemoryManager {
    /// Creates a manager with no databases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a database to be opened on first use.
    ///
    /// Declaring an already registered name with the same type is a no-op.
    pub fn declare(&self, name: &str, db_type: DatabaseType) -> StoreResult<()> {
        let name = validate_name(name)?;
        let mut registry = self.registry.write();

        if let Some(existing) = registry.entries.get(name) {
            return check_type(name, existing.db_type, db_type);
        }

        debug!(database = %name, db_type = %db_type, "declared database");
        registry.order.push(name.to_string());
        registry.entries.insert(
            name.to_string(),
            Registration {
                db_type,
                options: Map::new(),
                created_at: Utc::now(),
                handle: None,
            },
        );
        Ok(())
    }

    /// Registers an already opened database under its own name.
    ///
    /// The caller keeps its typed handle, which is how embedders and tests
    /// observe a database from outside the HTTP surface.
    pub fn register<D>(&self, db: Arc<D>) -> StoreResult<()>
    where
        D: Database + 'static,
    {
        let name = validate_name(db.name())?.to_string();
        let mut registry = self.registry.write();

        if registry.entries.contains_key(&name) {
            return Err(StoreError::Open {
                message: "a database with this name is already registered".to_string(),
                name,
            });
        }

        let db_type = db.db_type();
        info!(database = %name, db_type = %db_type, "registered database");
        registry.order.push(name.clone());
        registry.entries.insert(
            name,
            Registration {
                db_type,
                options: Map::new(),
                created_at: Utc::now(),
                handle: Some(db as DatabaseHandle),
            },
        );
        Ok(())
    }

    /// Returns the number of registered databases.
    pub fn len(&self) -> usize {
        self.registry.read().order.len()
    }

    /// Returns true if no databases are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn describe_entry(name: &str, entry: &Registration) -> DatabaseDescriptor {
        let capabilities = match &entry.handle {
            Some(handle) => handle.sorted_capabilities(),
            None => {
                let mut capabilities = capabilities_for(entry.db_type).to_vec();
                capabilities.sort();
                capabilities
            }
        };

        DatabaseDescriptor {
            name: name.to_string(),
            db_type: entry.db_type,
            address: format!("{}/{}", ADDRESS_PREFIX, name),
            opened: entry.handle.is_some(),
            capabilities,
            options: entry.options.clone(),
            created_at: entry.created_at,
        }
    }
}

#[async_trait]
impl DatabaseManager for MemoryManager {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn list(&self) -> Vec<DatabaseDescriptor> {
        let registry = self.registry.read();
        registry
            .order
            .iter()
            .filter_map(|name| {
                registry
                    .entries
                    .get(name)
                    .map(|entry| Self::describe_entry(name, entry))
            })
            .collect()
    }

    async fn resolve(&self, name: &str, options: OpenOptions) -> StoreResult<DatabaseHandle> {
        let name = validate_name(name)?;
        let requested = requested_type(name, &options)?;

        // Fast path: already open.
        {
            let registry = self.registry.read();
            if let Some(entry) = registry.entries.get(name) {
                if let Some(handle) = &entry.handle {
                    if let Some(requested) = requested {
                        check_type(name, entry.db_type, requested)?;
                    }
                    debug!(database = %name, "resolved cached handle");
                    return Ok(Arc::clone(handle));
                }
            }
        }

        let mut registry = self.registry.write();

        // Another request may have opened it between the locks.
        if let Some(entry) = registry.entries.get_mut(name) {
            if let Some(requested) = requested {
                check_type(name, entry.db_type, requested)?;
            }
            if let Some(handle) = &entry.handle {
                return Ok(Arc::clone(handle));
            }

            let handle = open_database(name, entry.db_type, &entry.options)?;
            info!(database = %name, db_type = %entry.db_type, "opened declared database");
            entry.handle = Some(Arc::clone(&handle));
            return Ok(handle);
        }

        if !options.allows_create() {
            return Err(StoreError::DatabaseNotFound {
                name: name.to_string(),
            });
        }

        let db_type = requested.ok_or_else(|| StoreError::Open {
            name: name.to_string(),
            message: "a database type is required to create a database".to_string(),
        })?;
        let handle = open_database(name, db_type, &options.metadata)?;
        info!(database = %name, db_type = %db_type, "created database");

        registry.order.push(name.to_string());
        registry.entries.insert(
            name.to_string(),
            Registration {
                db_type,
                options: options.metadata,
                created_at: Utc::now(),
                handle: Some(Arc::clone(&handle)),
            },
        );
        Ok(handle)
    }

    fn describe(&self, name: &str) -> StoreResult<DatabaseDescriptor> {
        let registry = self.registry.read();
        registry
            .entries
            .get(name)
            .map(|entry| Self::describe_entry(name, entry))
            .ok_or_else(|| StoreError::DatabaseNotFound {
                name: name.to_string(),
            })
    }
}

fn validate_name(name: &str) -> StoreResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Open {
            name: name.to_string(),
            message: "database name must not be empty".to_string(),
        });
    }
    Ok(trimmed)
}

fn requested_type(name: &str, options: &OpenOptions) -> StoreResult<Option<DatabaseType>> {
    options
        .db_type
        .as_deref()
        .map(|tag| {
            tag.parse::<DatabaseType>().map_err(|message| StoreError::Open {
                name: name.to_string(),
                message,
            })
        })
        .transpose()
}

fn check_type(name: &str, existing: DatabaseType, requested: DatabaseType) -> StoreResult<()> {
    if existing == requested {
        Ok(())
    } else {
        Err(StoreError::Open {
            name: name.to_string(),
            message: format!("database is a {}, not a {}", existing, requested),
        })
    }
}

fn open_database(
    name: &str,
    db_type: DatabaseType,
    options: &Map<String, Value>,
) -> StoreResult<DatabaseHandle> {
    let handle: DatabaseHandle = match db_type {
        DatabaseType::KeyValue => Arc::new(KeyValueDatabase::new(name)),
        DatabaseType::EventLog => Arc::new(EventLogDatabase::new(name)),
        DatabaseType::Feed => Arc::new(FeedDatabase::new(name)),
        DatabaseType::Counter => Arc::new(CounterDatabase::new(name)),
        DatabaseType::DocStore => {
            let index_by = match options.get("indexBy") {
                None | Some(Value::Null) => DEFAULT_INDEX_FIELD,
                Some(Value::String(field)) if !field.is_empty() => field.as_str(),
                Some(other) => {
                    return Err(StoreError::Open {
                        name: name.to_string(),
                        message: format!("invalid indexBy option: {}", other),
                    });
                }
            };
            Arc::new(DocumentDatabase::with_index(name, index_by))
        }
    };
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(db_type: &str) -> OpenOptions {
        OpenOptions::default().or_create(db_type)
    }

    #[tokio::test]
    async fn test_resolve_unknown_without_create_is_not_found() {
        let manager = MemoryManager::new();
        let err = manager
            .resolve("ghost", OpenOptions::existing())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, StoreError::DatabaseNotFound { .. }));
        assert!(manager.is_empty());
    }

    #[tokio::test]
    async fn test_register_shares_typed_handle() {
        let manager = MemoryManager::new();
        let counter = Arc::new(CounterDatabase::new("visits"));
        manager.register(Arc::clone(&counter)).unwrap();

        let db = manager.resolve("visits", OpenOptions::existing()).await.unwrap();
        db.inc(Some(json!(4))).await.unwrap();

        assert_eq!(counter.value(), 4);
        assert!(manager.describe("visits").unwrap().opened);
        assert!(manager.register(Arc::new(KeyValueDatabase::new("visits"))).is_err());
    }

    #[tokio::test]
    async fn test_resolve_creates_once() {
        let manager = MemoryManager::new();
        let first = manager.resolve("kv", create("keyvalue")).await.unwrap();
        let second = manager.resolve("kv", OpenOptions::existing()).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(manager.len(), 1);
    }

    #[tokio::test]
    async fn test_declared_database_opens_lazily() {
        let manager = MemoryManager::new();
        manager.declare("events", DatabaseType::EventLog).unwrap();
        assert!(!manager.describe("events").unwrap().opened);

        let db = manager.resolve("events", OpenOptions::existing()).await.unwrap();
        assert_eq!(db.db_type(), DatabaseType::EventLog);
        assert!(manager.describe("events").unwrap().opened);
    }

    #[tokio::test]
    async fn test_type_mismatch_is_open_error() {
        let manager = MemoryManager::new();
        manager.resolve("kv", create("keyvalue")).await.unwrap();

        let err = manager.resolve("kv", create("feed")).await.err().unwrap();
        assert!(matches!(err, StoreError::Open { .. }));
        assert!(manager.declare("kv", DatabaseType::Counter).is_err());
        assert!(manager.declare("kv", DatabaseType::KeyValue).is_ok());
    }

    #[tokio::test]
    async fn test_unknown_type_and_empty_name() {
        let manager = MemoryManager::new();
        let err = manager.resolve("x", create("graph")).await.err().unwrap();
        assert!(matches!(err, StoreError::Open { .. }));

        let err = manager.resolve("  ", create("feed")).await.err().unwrap();
        assert!(matches!(err, StoreError::Open { .. }));
    }

    #[tokio::test]
    async fn test_create_requires_type() {
        let manager = MemoryManager::new();
        let options = OpenOptions {
            create: Some(true),
            ..Default::default()
        };
        let err = manager.resolve("x", options).await.err().unwrap();
        assert!(matches!(err, StoreError::Open { .. }));
    }

    #[tokio::test]
    async fn test_list_follows_registration_order() {
        let manager = MemoryManager::new();
        manager.resolve("b", create("counter")).await.unwrap();
        manager.declare("a", DatabaseType::Feed).unwrap();
        manager.resolve("c", create("docstore")).await.unwrap();

        let names: Vec<_> = manager.list().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_descriptor_carries_options_and_capabilities() {
        let manager = MemoryManager::new();
        let mut options = create("docstore");
        options.metadata.insert("indexBy".to_string(), json!("email"));
        manager.resolve("people", options).await.unwrap();

        let descriptor = manager.describe("people").unwrap();
        assert_eq!(descriptor.address, "/orbitgate/people");
        assert_eq!(descriptor.options["indexBy"], "email");
        let caps: Vec<_> = descriptor.capabilities.iter().map(|c| c.as_str()).collect();
        assert_eq!(caps, vec!["del", "get", "put", "query"]);
    }

    #[tokio::test]
    async fn test_invalid_index_option() {
        let manager = MemoryManager::new();
        let mut options = create("docstore");
        options.metadata.insert("indexBy".to_string(), json!(3));
        assert!(manager.resolve("people", options).await.is_err());
        assert!(manager.describe("people").is_err());
    }

    #[tokio::test]
    async fn test_concurrent_resolution_yields_one_handle() {
        let manager = Arc::new(MemoryManager::new());
        manager.declare("shared", DatabaseType::Feed).unwrap();

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let manager = Arc::clone(&manager);
                tokio::spawn(async move {
                    manager
                        .resolve("shared", OpenOptions::existing())
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut handles = Vec::new();
        for task in tasks {
            handles.push(task.await.unwrap());
        }
        assert!(handles.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
