//! Write handlers: put, add and inc.
//!
//! Each write answers with the hash of the entry it produced.

use axum::{extract::State, response::Response};
use orbitgate_persistence::core::DatabaseManager;
use serde_json::Value;
use tracing::debug;

use crate::dispatch::OperationRequest;
use crate::error::RestResult;
use crate::extractors::{DbPath, RequestBody};
use crate::state::AppState;

use super::run;

/// Handler for keyed writes.
///
/// # HTTP Request
///
/// `POST|PUT [base]/db/[dbname]/put`
///
/// The body is handed to the database as is: `{"key": ..., "value": ...}`
/// for keyvalue, the document itself for docstore.
pub async fn put_handler<M>(
    State(state): State<AppState<M>>,
    DbPath(dbname): DbPath<String>,
    RequestBody(body): RequestBody,
) -> RestResult<Response>
where
    M: DatabaseManager,
{
    debug!(database = %dbname, "Processing put request");

    run(&state, &dbname, OperationRequest::Put { body }).await
}

/// Handler for appends.
///
/// # HTTP Request
///
/// `POST|PUT [base]/db/[dbname]/add`
pub async fn add_handler<M>(
    State(state): State<AppState<M>>,
    DbPath(dbname): DbPath<String>,
    RequestBody(body): RequestBody,
) -> RestResult<Response>
where
    M: DatabaseManager,
{
    debug!(database = %dbname, "Processing add request");

    run(&state, &dbname, OperationRequest::Add { value: body }).await
}

/// Handler for counter increments with the amount in the body.
///
/// # HTTP Request
///
/// `POST|PUT [base]/db/[dbname]/inc` with `{"val": 5}`; no `val`
/// increments by one.
pub async fn inc_handler<M>(
    State(state): State<AppState<M>>,
    DbPath(dbname): DbPath<String>,
    body: RequestBody,
) -> RestResult<Response>
where
    M: DatabaseManager,
{
    let amount = body.field("val").cloned();
    debug!(database = %dbname, amount = ?amount, "Processing inc request");

    run(&state, &dbname, OperationRequest::Inc { amount }).await
}

/// Handler for counter increments with the amount in the path.
///
/// # HTTP Request
///
/// `POST|PUT [base]/db/[dbname]/inc/[val]`
pub async fn inc_value_handler<M>(
    State(state): State<AppState<M>>,
    DbPath((dbname, val)): DbPath<(String, String)>,
) -> RestResult<Response>
where
    M: DatabaseManager,
{
    debug!(database = %dbname, amount = %val, "Processing inc request");

    let amount = Some(Value::String(val));
    run(&state, &dbname, OperationRequest::Inc { amount }).await
}
