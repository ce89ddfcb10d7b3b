//! Database-level handlers: list, open and describe.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use orbitgate_persistence::core::DatabaseManager;
use orbitgate_persistence::types::OpenOptions;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{RestError, RestResult};
use crate::extractors::{DbPath, RequestBody};
use crate::state::AppState;

/// Handler for listing databases.
///
/// # HTTP Request
///
/// `GET [base]/dbs`
///
/// # Response
///
/// - `200 OK` - Array of database descriptors, in manager order
pub async fn list_handler<M>(State(state): State<AppState<M>>) -> RestResult<Response>
where
    M: DatabaseManager,
{
    debug!("Processing list request");

    let descriptors = state.manager().list();
    Ok((StatusCode::OK, Json(descriptors)).into_response())
}

/// Handler for opening a database named in the body.
///
/// Unknown databases are created unless the body says `"create": false`;
/// the type defaults to the configured default type.
///
/// # HTTP Request
///
/// `POST [base]/db` with `{"dbname": "...", "type": "...", ...}`
///
/// # Response
///
/// - `200 OK` - The database descriptor
pub async fn open_handler<M>(
    State(state): State<AppState<M>>,
    RequestBody(body): RequestBody,
) -> RestResult<Response>
where
    M: DatabaseManager,
{
    let options = open_options(body)?;
    let name = options
        .dbname
        .clone()
        .ok_or_else(|| RestError::malformed("dbname is required"))?;

    open_and_describe(&state, &name, options).await
}

/// Handler for opening a database named in the path.
///
/// The body is read as in [`open_handler`]; the path name wins over any
/// `dbname` in the body.
///
/// # HTTP Request
///
/// `POST [base]/db/[dbname]`
pub async fn open_named_handler<M>(
    State(state): State<AppState<M>>,
    DbPath(dbname): DbPath<String>,
    RequestBody(body): RequestBody,
) -> RestResult<Response>
where
    M: DatabaseManager,
{
    let options = open_options(body)?.with_name(dbname.as_str());
    open_and_describe(&state, &dbname, options).await
}

/// Handler for describing a database.
///
/// Opens a declared database if it is not open yet.
///
/// # HTTP Request
///
/// `GET [base]/db/[dbname]`
///
/// # Response
///
/// - `200 OK` - The database descriptor
/// - `500` - Unknown database
pub async fn describe_handler<M>(
    State(state): State<AppState<M>>,
    DbPath(dbname): DbPath<String>,
) -> RestResult<Response>
where
    M: DatabaseManager,
{
    debug!(database = %dbname, "Processing describe request");

    let db = state.open_existing(&dbname).await?;
    let descriptor = state.manager().describe(db.name())?;
    Ok((StatusCode::OK, Json(descriptor)).into_response())
}

fn open_options(body: Value) -> RestResult<OpenOptions> {
    serde_json::from_value(body)
        .map_err(|e| RestError::malformed(format!("invalid open options: {}", e)))
}

async fn open_and_describe<M>(
    state: &AppState<M>,
    name: &str,
    options: OpenOptions,
) -> RestResult<Response>
where
    M: DatabaseManager,
{
    let options = options.or_create(state.default_db_type());
    debug!(database = %name, db_type = ?options.db_type, "Processing open request");

    let db = state.manager().resolve(name, options).await?;
    let descriptor = state.manager().describe(db.name())?;

    info!(database = %descriptor.name, db_type = %descriptor.db_type, "Database ready");
    Ok((StatusCode::OK, Json(descriptor)).into_response())
}
