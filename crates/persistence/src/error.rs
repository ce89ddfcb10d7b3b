//! Error types for the persistence layer.
//!
//! Every manager and backend operation returns a [`StoreError`]. The REST
//! layer folds these into its own error kinds for diagnostics.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use crate::core::Operation;
use crate::types::DatabaseType;

/// The primary error type for all manager and database operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No database with the given name is known to the manager.
    #[error("database not found: {name}")]
    DatabaseNotFound { name: String },

    /// The database exists but holds nothing under the given key.
    #[error("item not found: {database}/{key}")]
    ItemNotFound { database: String, key: String },

    /// The manager could not open or create the database.
    #[error("failed to open database '{name}': {message}")]
    Open { name: String, message: String },

    /// The database type does not expose the requested operation.
    #[error("database type {db_type} does not support '{operation}'")]
    UnsupportedOperation {
        db_type: DatabaseType,
        operation: Operation,
    },

    /// The operation input was rejected by the backend.
    #[error("invalid input for {database}: {message}")]
    InvalidInput { database: String, message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StoreError {
    /// Shorthand for an [`StoreError::UnsupportedOperation`].
    pub fn unsupported(db_type: DatabaseType, operation: Operation) -> Self {
        StoreError::UnsupportedOperation { db_type, operation }
    }

    /// Shorthand for an [`StoreError::InvalidInput`].
    pub fn invalid_input(database: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::InvalidInput {
            database: database.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`StoreError::ItemNotFound`].
    pub fn item_not_found(database: impl Into<String>, key: impl Into<String>) -> Self {
        StoreError::ItemNotFound {
            database: database.into(),
            key: key.into(),
        }
    }

    /// Returns true for the "nothing there" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::DatabaseNotFound { .. } | StoreError::ItemNotFound { .. }
        )
    }
}

/// Result type alias for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;
