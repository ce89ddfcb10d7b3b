//! Log iterator handler.

use axum::{
    extract::State,
    http::HeaderMap,
    response::Response,
};
use orbitgate_persistence::core::DatabaseManager;
use orbitgate_persistence::types::IteratorOptions;
use tracing::debug;

use crate::dispatch::{OperationRequest, iterate};
use crate::error::{RestError, RestResult};
use crate::extractors::{DbPath, RequestParams};
use crate::responses::{ndjson_response, wants_ndjson};
use crate::state::AppState;

use super::run;

/// Handler for iterating a log.
///
/// Returns the payload values of the selected entries. With
/// `Accept: application/x-ndjson` the values are streamed one per line
/// instead of being collected first.
///
/// # HTTP Request
///
/// `GET [base]/db/[dbname]/iterator` with
/// `{"limit": n, "gt"|"gte"|"lt"|"lte": hash, "reverse": bool}`
///
/// # Response
///
/// - `200 OK` - Array (or NDJSON stream) of payload values
/// - `500` - Unknown database or bound, or the type has no `iterator`
pub async fn iterator_handler<M>(
    State(state): State<AppState<M>>,
    DbPath(dbname): DbPath<String>,
    headers: HeaderMap,
    RequestParams(body): RequestParams,
) -> RestResult<Response>
where
    M: DatabaseManager,
{
    let options: IteratorOptions = serde_json::from_value(body)
        .map_err(|e| RestError::malformed(format!("invalid iterator options: {}", e)))?;
    let streaming = wants_ndjson(&headers);
    debug!(database = %dbname, options = ?options, streaming, "Processing iterator request");

    if streaming {
        let db = state.open_existing(&dbname).await?;
        let values = iterate(db.as_ref(), options).await?;
        return Ok(ndjson_response(values));
    }

    run(&state, &dbname, OperationRequest::Iterator { options }).await
}
