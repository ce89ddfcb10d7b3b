//! Item delete handler.

use axum::{extract::State, http::Uri, response::Response};
use orbitgate_persistence::core::DatabaseManager;
use tracing::debug;

use crate::dispatch::OperationRequest;
use crate::error::RestResult;
use crate::extractors::DbPath;
use crate::state::AppState;

use super::{run, static_item};

/// Handler for deleting an item.
///
/// Keyed databases delete with `del`; feeds fall back to `remove` by
/// entry hash. Databases with neither fail.
///
/// # HTTP Request
///
/// `DELETE [base]/db/[dbname]/[item]`
///
/// # Response
///
/// - `200 OK` - Hash of the delete entry
/// - `500` - Unknown database, or the type cannot delete
///
/// # Example
///
/// ```http
/// DELETE /db/settings/theme HTTP/1.1
/// Host: localhost:3000
/// ```
pub async fn delete_handler<M>(
    State(state): State<AppState<M>>,
    DbPath((dbname, item)): DbPath<(String, String)>,
) -> RestResult<Response>
where
    M: DatabaseManager,
{
    debug!(database = %dbname, item = %item, "Processing delete request");

    run(&state, &dbname, OperationRequest::Delete { key: item }).await
}

/// Handler for deleting an item whose key collides with an operation
/// segment, such as `DELETE [base]/db/[dbname]/iterator`.
pub async fn static_delete_handler<M>(
    State(state): State<AppState<M>>,
    DbPath(dbname): DbPath<String>,
    uri: Uri,
) -> RestResult<Response>
where
    M: DatabaseManager,
{
    let key = static_item(&uri);
    debug!(database = %dbname, item = %key, "Processing delete request");

    run(&state, &dbname, OperationRequest::Delete { key }).await
}
