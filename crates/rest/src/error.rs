//! Error types for the orbitgate REST API.
//!
//! Every failure along the request pipeline becomes a [`RestError`]. The
//! client never sees which kind it was: all of them render as the same
//! `500` response with the JSON body `"ERROR"`, while the full error is
//! logged server-side.
//!
//! # Error Mapping
//!
//! | Store Error | Error Kind |
//! |-------------|------------|
//! | DatabaseNotFound | NotFound |
//! | ItemNotFound | NotFound |
//! | Open | OpenError |
//! | UnsupportedOperation | UnsupportedOperation |
//! | InvalidInput | BackendFailure |
//! | Internal | BackendFailure |
//!
//! # Committed responses
//!
//! Once the first byte of a response body has been sent the status line is
//! gone. Failures before that point render through [`IntoResponse`]; a
//! streamed body passes later failures through [`abort_committed`], which
//! logs them and hands them back so the transport aborts the connection.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use orbitgate_persistence::core::Operation;
use orbitgate_persistence::error::StoreError;
use orbitgate_persistence::types::DatabaseType;
use thiserror::Error;
use tracing::error;

/// The body sent for every failed request.
pub const ERROR_BODY: &str = "ERROR";

/// The primary error type for REST API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// The database or the addressed item does not exist.
    #[error("not found: {what}")]
    NotFound {
        /// What was looked up.
        what: String,
    },

    /// The manager failed to open or create a database.
    #[error("failed to open database '{name}': {message}")]
    OpenError {
        /// The database name.
        name: String,
        /// Why opening failed.
        message: String,
    },

    /// The database type does not expose the requested operation.
    #[error("{db_type} database does not support '{operation}'")]
    UnsupportedOperation {
        /// Type tag of the database handle.
        db_type: DatabaseType,
        /// The operation that was requested.
        operation: Operation,
    },

    /// The query comparator or its operands are invalid.
    #[error("invalid query: {message}")]
    InvalidQuery {
        /// What is wrong with the query.
        message: String,
    },

    /// The backend rejected or failed the operation.
    #[error("backend failure: {message}")]
    BackendFailure {
        /// Error message.
        message: String,
        /// The underlying store error, if any.
        #[source]
        source: Option<StoreError>,
    },

    /// The request could not be decoded (body or path).
    #[error("malformed request: {message}")]
    MalformedRequest {
        /// Error message.
        message: String,
    },
}

/// The kind of a [`RestError`], used for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`RestError::NotFound`].
    NotFound,
    /// See [`RestError::OpenError`].
    OpenError,
    /// See [`RestError::UnsupportedOperation`].
    UnsupportedOperation,
    /// See [`RestError::InvalidQuery`].
    InvalidQuery,
    /// See [`RestError::BackendFailure`].
    BackendFailure,
    /// See [`RestError::MalformedRequest`].
    MalformedRequest,
}

impl RestError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RestError::NotFound { .. } => ErrorKind::NotFound,
            RestError::OpenError { .. } => ErrorKind::OpenError,
            RestError::UnsupportedOperation { .. } => ErrorKind::UnsupportedOperation,
            RestError::InvalidQuery { .. } => ErrorKind::InvalidQuery,
            RestError::BackendFailure { .. } => ErrorKind::BackendFailure,
            RestError::MalformedRequest { .. } => ErrorKind::MalformedRequest,
        }
    }

    /// Creates an [`RestError::InvalidQuery`].
    pub fn invalid_query(message: impl Into<String>) -> Self {
        RestError::InvalidQuery {
            message: message.into(),
        }
    }

    /// Creates a [`RestError::MalformedRequest`].
    pub fn malformed(message: impl Into<String>) -> Self {
        RestError::MalformedRequest {
            message: message.into(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        error!(kind = ?self.kind(), error = %self, "request failed");
        error_response()
    }
}

/// Builds the fixed failure response.
pub fn error_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ERROR_BODY)).into_response()
}

/// Logs a failure on a committed response and hands it back to the body.
///
/// No second status is ever written; the body stream fails instead.
pub fn abort_committed(err: RestError) -> RestError {
    error!(kind = ?err.kind(), error = %err, "failure after response was committed");
    err
}

impl From<StoreError> for RestError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DatabaseNotFound { name } => RestError::NotFound {
                what: format!("database '{}'", name),
            },
            StoreError::ItemNotFound { database, key } => RestError::NotFound {
                what: format!("{}/{}", database, key),
            },
            StoreError::Open { name, message } => RestError::OpenError { name, message },
            StoreError::UnsupportedOperation { db_type, operation } => {
                RestError::UnsupportedOperation { db_type, operation }
            }
            err @ (StoreError::InvalidInput { .. } | StoreError::Internal { .. }) => {
                RestError::BackendFailure {
                    message: err.to_string(),
                    source: Some(err),
                }
            }
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
