//! HTTP request handlers.
//!
//! - [`databases`] - List, open and describe databases
//! - [`read`] - Read an item
//! - [`delete`] - Delete an item
//! - [`write`] - put, add and inc
//! - [`query`] - Predicate queries over documents
//! - [`iterator`] - Log iteration
//! - [`health`] - Health check endpoint

pub mod databases;
pub mod delete;
pub mod health;
pub mod iterator;
pub mod query;
pub mod read;
pub mod write;

// Re-export handlers for convenience
pub use databases::{describe_handler, list_handler, open_handler, open_named_handler};
pub use delete::{delete_handler, static_delete_handler};
pub use health::{health_handler, liveness_handler};
pub use iterator::iterator_handler;
pub use query::query_handler;
pub use read::{get_handler, static_get_handler};
pub use write::{add_handler, inc_handler, inc_value_handler, put_handler};

use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use orbitgate_persistence::core::DatabaseManager;

use crate::dispatch::{OperationRequest, dispatch};
use crate::error::RestResult;
use crate::state::AppState;

/// Resolves `dbname` and runs one operation against it.
async fn run<M>(
    state: &AppState<M>,
    dbname: &str,
    request: OperationRequest,
) -> RestResult<Response>
where
    M: DatabaseManager,
{
    let db = state.open_existing(dbname).await?;
    let result = dispatch(db.as_ref(), request).await?;
    Ok((StatusCode::OK, Json(result)).into_response())
}

/// The last path segment, used as the item key on operation routes.
fn static_item(uri: &Uri) -> String {
    uri.path()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}
