//! REST API test harness.

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use orbitgate_persistence::backends::memory::MemoryManager;
use orbitgate_persistence::core::DatabaseManager;
use serde_json::{Value, json};

use orbitgate_rest::{ServerConfig, create_app_with_shared};

/// Builds the full application, middleware included, around `manager`.
pub fn app_for<M>(manager: Arc<M>) -> Router
where
    M: DatabaseManager + 'static,
{
    create_app_with_shared(manager, ServerConfig::for_testing())
}

/// Creates a test server around `manager`.
pub fn server_for<M>(manager: Arc<M>) -> TestServer
where
    M: DatabaseManager + 'static,
{
    TestServer::new(app_for(manager)).expect("Failed to create test server")
}

/// Creates a test server backed by an empty in-memory manager.
pub fn memory_server() -> (TestServer, Arc<MemoryManager>) {
    let manager = Arc::new(MemoryManager::new());
    (server_for(Arc::clone(&manager)), manager)
}

/// Opens (creating if needed) a database of the given type.
pub async fn open(server: &TestServer, name: &str, db_type: &str) -> Value {
    let response = server
        .post(&format!("/db/{}", name))
        .json(&json!({"type": db_type}))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

/// Asserts the uniform failure response.
pub fn assert_error(response: &TestResponse) {
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!("ERROR"));
}

/// Extracts a write result hash.
pub fn hash_of(response: &TestResponse) -> String {
    response.assert_status_ok();
    response
        .json::<Value>()
        .as_str()
        .expect("write should return a hash string")
        .to_string()
}
