//! Capability dispatch.
//!
//! Handlers describe what they want as an [`OperationRequest`]; the
//! dispatcher checks the handle's capability set and invokes the matching
//! backend method. Database types spell some operations differently, so
//! deletion goes to `del` when the handle has it and to `remove` otherwise.

use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use orbitgate_persistence::core::{Database, Operation};
use orbitgate_persistence::types::{IteratorOptions, LogEntry};
use serde_json::Value;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::query::Predicate;

/// A logical operation against one database.
#[derive(Debug)]
pub enum OperationRequest {
    /// Read by key or entry hash.
    Get {
        /// Key or hash.
        key: String,
    },
    /// Keyed write of the request body.
    Put {
        /// The request body.
        body: Value,
    },
    /// Append the request body.
    Add {
        /// The request body.
        value: Value,
    },
    /// Increment a counter.
    Inc {
        /// Amount; `None` increments by one.
        amount: Option<Value>,
    },
    /// Delete by key or hash, whichever the handle supports.
    Delete {
        /// Key or hash.
        key: String,
    },
    /// Filter documents.
    Query {
        /// The compiled predicate.
        predicate: Predicate,
    },
    /// Materialize the log.
    Iterator {
        /// Range and ordering.
        options: IteratorOptions,
    },
}

impl OperationRequest {
    /// The name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            OperationRequest::Get { .. } => "get",
            OperationRequest::Put { .. } => "put",
            OperationRequest::Add { .. } => "add",
            OperationRequest::Inc { .. } => "inc",
            OperationRequest::Delete { .. } => "delete",
            OperationRequest::Query { .. } => "query",
            OperationRequest::Iterator { .. } => "iterator",
        }
    }
}

/// Fails with `UnsupportedOperation` unless the handle supports `operation`.
pub fn require(db: &dyn Database, operation: Operation) -> RestResult<()> {
    if db.supports(operation) {
        Ok(())
    } else {
        Err(RestError::UnsupportedOperation {
            db_type: db.db_type(),
            operation,
        })
    }
}

/// Picks the backend operation that implements a delete.
pub fn delete_operation(db: &dyn Database) -> RestResult<Operation> {
    [Operation::Del, Operation::Remove]
        .into_iter()
        .find(|op| db.supports(*op))
        .ok_or(RestError::UnsupportedOperation {
            db_type: db.db_type(),
            operation: Operation::Del,
        })
}

/// Runs one logical operation and returns its JSON result.
pub async fn dispatch(db: &dyn Database, request: OperationRequest) -> RestResult<Value> {
    debug!(database = %db.name(), operation = request.name(), "dispatching");

    let result = match request {
        OperationRequest::Get { key } => {
            require(db, Operation::Get)?;
            db.get(&key).await?
        }
        OperationRequest::Put { body } => {
            require(db, Operation::Put)?;
            db.put(body).await?
        }
        OperationRequest::Add { value } => {
            require(db, Operation::Add)?;
            db.add(value).await?
        }
        OperationRequest::Inc { amount } => {
            require(db, Operation::Inc)?;
            db.inc(amount).await?
        }
        OperationRequest::Delete { key } => match delete_operation(db)? {
            Operation::Remove => db.remove(&key).await?,
            _ => db.del(&key).await?,
        },
        OperationRequest::Query { predicate } => {
            require(db, Operation::Query)?;
            let matches = db.query(&|doc| predicate.matches(doc)).await?;
            Value::Array(matches)
        }
        OperationRequest::Iterator { options } => {
            let values: Vec<Value> = iterate(db, options).await?.try_collect().await?;
            Value::Array(values)
        }
    };
    Ok(result)
}

/// Opens the log iterator and projects each entry to its payload value.
pub async fn iterate(
    db: &dyn Database,
    options: IteratorOptions,
) -> RestResult<BoxStream<'static, RestResult<Value>>> {
    require(db, Operation::Iterator)?;
    let entries = db.iterator(options).await?;
    Ok(entries
        .map_ok(LogEntry::into_value)
        .map_err(RestError::from)
        .boxed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::query::QueryParams;
    use orbitgate_persistence::backends::memory::{
        CounterDatabase, DocumentDatabase, EventLogDatabase, FeedDatabase, KeyValueDatabase,
    };
    use serde_json::json;

    #[tokio::test]
    async fn test_delete_prefers_del() {
        let db = KeyValueDatabase::new("kv");
        dispatch(&db, OperationRequest::Put { body: json!({"key": "a", "value": 1}) })
            .await
            .unwrap();
        assert_eq!(delete_operation(&db).unwrap(), Operation::Del);

        dispatch(&db, OperationRequest::Delete { key: "a".to_string() })
            .await
            .unwrap();
        assert!(db.is_empty());
    }

    #[tokio::test]
    async fn test_delete_falls_back_to_remove() {
        let db = FeedDatabase::new("feed");
        let hash = dispatch(&db, OperationRequest::Add { value: json!("x") })
            .await
            .unwrap();
        assert_eq!(delete_operation(&db).unwrap(), Operation::Remove);

        dispatch(
            &db,
            OperationRequest::Delete {
                key: hash.as_str().unwrap().to_string(),
            },
        )
        .await
        .unwrap();
        assert!(db.is_empty());
    }

    #[tokio::test]
    async fn test_delete_without_del_or_remove() {
        let db = EventLogDatabase::new("events");
        let err = dispatch(&db, OperationRequest::Delete { key: "h".to_string() })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RestError::UnsupportedOperation {
                operation: Operation::Del,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_unsupported_operations_are_rejected_before_invocation() {
        let db = CounterDatabase::new("visits");
        let err = dispatch(&db, OperationRequest::Get { key: "x".to_string() })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);

        let err = dispatch(&db, OperationRequest::Iterator { options: IteratorOptions::default() })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
    }

    #[tokio::test]
    async fn test_iterator_projects_payload_values() {
        let db = EventLogDatabase::new("events");
        for n in 1..=3 {
            dispatch(&db, OperationRequest::Add { value: json!({"n": n}) })
                .await
                .unwrap();
        }

        let result = dispatch(&db, OperationRequest::Iterator { options: IteratorOptions::default() })
            .await
            .unwrap();
        assert_eq!(result, json!([{"n": 1}, {"n": 2}, {"n": 3}]));
    }

    #[tokio::test]
    async fn test_query() {
        let db = DocumentDatabase::new("people");
        for (id, age) in [("a", 20), ("b", 41), ("c", 35)] {
            dispatch(&db, OperationRequest::Put { body: json!({"_id": id, "age": age}) })
                .await
                .unwrap();
        }

        let params = QueryParams::from_body(json!({"comp": ">=", "propname": "age", "values": [35]}))
            .unwrap();
        let predicate = Predicate::compile(params).unwrap();
        let result = dispatch(&db, OperationRequest::Query { predicate })
            .await
            .unwrap();
        assert_eq!(result, json!([{"_id": "b", "age": 41}, {"_id": "c", "age": 35}]));
    }

    #[tokio::test]
    async fn test_inc() {
        let db = CounterDatabase::new("visits");
        dispatch(&db, OperationRequest::Inc { amount: None }).await.unwrap();
        dispatch(&db, OperationRequest::Inc { amount: Some(json!("4")) })
            .await
            .unwrap();
        assert_eq!(db.value(), 5);
    }
}
