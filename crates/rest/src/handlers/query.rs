//! Document query handler.

use axum::{extract::State, response::Response};
use orbitgate_persistence::core::DatabaseManager;
use tracing::debug;

use crate::dispatch::OperationRequest;
use crate::error::RestResult;
use crate::extractors::{DbPath, RequestParams};
use crate::query::{Predicate, QueryParams};
use crate::state::AppState;

use super::run;

/// Handler for predicate queries.
///
/// # HTTP Request
///
/// `GET [base]/db/[dbname]/query` with `{"comp": ..., "propname": ..., "values": [...]}`
///
/// # Response
///
/// - `200 OK` - Matching documents in storage order
/// - `500` - Invalid query, unknown database, or the type has no `query`
pub async fn query_handler<M>(
    State(state): State<AppState<M>>,
    DbPath(dbname): DbPath<String>,
    RequestParams(body): RequestParams,
) -> RestResult<Response>
where
    M: DatabaseManager,
{
    let predicate = Predicate::compile(QueryParams::from_body(body)?)?;
    debug!(database = %dbname, comparator = %predicate.comparator(), "Processing query request");

    run(&state, &dbname, OperationRequest::Query { predicate }).await
}
