//! Item read handler.

use axum::{extract::State, http::Uri, response::Response};
use orbitgate_persistence::core::DatabaseManager;
use tracing::debug;

use crate::dispatch::OperationRequest;
use crate::error::RestResult;
use crate::extractors::DbPath;
use crate::state::AppState;

use super::{run, static_item};

/// Handler for reading an item.
///
/// The item is a key for keyed databases and an entry hash for logs.
///
/// # HTTP Request
///
/// `GET [base]/db/[dbname]/[item]`
///
/// # Response
///
/// - `200 OK` - The stored value (an array of matches for docstores)
/// - `500` - Unknown database or item, or the type has no `get`
pub async fn get_handler<M>(
    State(state): State<AppState<M>>,
    DbPath((dbname, item)): DbPath<(String, String)>,
) -> RestResult<Response>
where
    M: DatabaseManager,
{
    debug!(database = %dbname, item = %item, "Processing get request");

    run(&state, &dbname, OperationRequest::Get { key: item }).await
}

/// Handler for reading an item whose key collides with an operation
/// segment, such as `GET [base]/db/[dbname]/put`.
pub async fn static_get_handler<M>(
    State(state): State<AppState<M>>,
    DbPath(dbname): DbPath<String>,
    uri: Uri,
) -> RestResult<Response>
where
    M: DatabaseManager,
{
    let key = static_item(&uri);
    debug!(database = %dbname, item = %key, "Processing get request");

    run(&state, &dbname, OperationRequest::Get { key }).await
}
