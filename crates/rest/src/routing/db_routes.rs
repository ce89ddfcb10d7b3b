//! Database route configuration.

use axum::{
    Router,
    routing::{get, post},
};
use orbitgate_persistence::core::DatabaseManager;

use crate::handlers;
use crate::state::AppState;

/// Creates all database API routes.
///
/// # Routes
///
/// ## System-level
/// - `GET /dbs` - List databases
/// - `POST /db` - Open or create the database named in the body
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
///
/// ## Database-level
/// - `GET /db/{dbname}` - Describe
/// - `POST /db/{dbname}` - Open or create
/// - `POST|PUT /db/{dbname}/put` - Keyed write
/// - `POST|PUT /db/{dbname}/add` - Append
/// - `POST|PUT /db/{dbname}/inc` - Increment by body `val`
/// - `POST|PUT /db/{dbname}/inc/{val}` - Increment by path value
/// - `GET /db/{dbname}/query` - Predicate query
/// - `GET /db/{dbname}/iterator` - Log iteration
///
/// ## Item-level
/// - `GET /db/{dbname}/{item}` - Read
/// - `DELETE /db/{dbname}/{item}` - Delete
///
/// Static segments take priority over `{item}`. Items named `put`, `add`
/// or `inc` are still read and deleted through GET and DELETE on those
/// routes, and items named `query` or `iterator` through DELETE.
pub fn create_routes<M>(state: AppState<M>) -> Router
where
    M: DatabaseManager + 'static,
{
    Router::new()
        // System-level routes
        .route("/dbs", get(handlers::list_handler::<M>))
        .route("/db", post(handlers::open_handler::<M>))
        .route("/health", get(handlers::health_handler::<M>))
        .route("/_liveness", get(handlers::liveness_handler))
        // Database-level routes
        .route(
            "/db/{dbname}",
            get(handlers::describe_handler::<M>).post(handlers::open_named_handler::<M>),
        )
        .route(
            "/db/{dbname}/put",
            post(handlers::put_handler::<M>)
                .put(handlers::put_handler::<M>)
                .get(handlers::static_get_handler::<M>)
                .delete(handlers::static_delete_handler::<M>),
        )
        .route(
            "/db/{dbname}/add",
            post(handlers::add_handler::<M>)
                .put(handlers::add_handler::<M>)
                .get(handlers::static_get_handler::<M>)
                .delete(handlers::static_delete_handler::<M>),
        )
        .route(
            "/db/{dbname}/inc",
            post(handlers::inc_handler::<M>)
                .put(handlers::inc_handler::<M>)
                .get(handlers::static_get_handler::<M>)
                .delete(handlers::static_delete_handler::<M>),
        )
        .route(
            "/db/{dbname}/inc/{val}",
            post(handlers::inc_value_handler::<M>).put(handlers::inc_value_handler::<M>),
        )
        .route(
            "/db/{dbname}/query",
            get(handlers::query_handler::<M>).delete(handlers::static_delete_handler::<M>),
        )
        .route(
            "/db/{dbname}/iterator",
            get(handlers::iterator_handler::<M>).delete(handlers::static_delete_handler::<M>),
        )
        // Item-level routes
        .route(
            "/db/{dbname}/{item}",
            get(handlers::get_handler::<M>).delete(handlers::delete_handler::<M>),
        )
        // State
        .with_state(state)
}
