//! # orbitgate-rest - HTTP API over dynamically opened databases
//!
//! This crate exposes a uniform HTTP interface over named databases of
//! heterogeneous types (key-value stores, event logs, feeds, document stores,
//! counters). Databases are resolved by name through a
//! [`DatabaseManager`](orbitgate_persistence::core::DatabaseManager) and
//! opened lazily on first use.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use orbitgate_persistence::backends::memory::MemoryManager;
//! use orbitgate_rest::{create_app, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let app = create_app(MemoryManager::new());
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Operation | HTTP Method | URL Pattern |
//! |-----------|-------------|-------------|
//! | list | GET | `/dbs` |
//! | open | POST | `/db` or `/db/[dbname]` |
//! | describe | GET | `/db/[dbname]` |
//! | get | GET | `/db/[dbname]/[item]` |
//! | delete | DELETE | `/db/[dbname]/[item]` |
//! | put | POST, PUT | `/db/[dbname]/put` |
//! | add | POST, PUT | `/db/[dbname]/add` |
//! | inc | POST, PUT | `/db/[dbname]/inc` or `/db/[dbname]/inc/[val]` |
//! | query | GET | `/db/[dbname]/query` |
//! | iterator | GET | `/db/[dbname]/iterator` |
//!
//! ## Error Handling
//!
//! Every failure, whatever its cause, is answered with `500` and the JSON
//! body `"ERROR"`. Details only go to the log. See [`error`].
//!
//! ## Architecture
//!
//! - [`error`] - Error kinds and the failure normalizer
//! - [`config`] - Server configuration
//! - [`state`] - Application state (manager, configuration)
//! - [`query`] - Predicate compilation for document queries
//! - [`dispatch`] - Capability-checked operation dispatch
//! - [`handlers`] - HTTP request handlers
//! - [`extractors`] - Body and path extractors
//! - [`responses`] - Streamed responses
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod query;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, extract::DefaultBodyLimit, http::StatusCode, response::Response};
use orbitgate_persistence::core::DatabaseManager;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyCors, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with configuration read from the
/// `ORBITGATE_*` environment variables.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<M>(manager: M) -> Router
where
    M: DatabaseManager + 'static,
{
    create_app_with_config(manager, ServerConfig::from_env())
}

/// Creates the Axum application with custom configuration.
///
/// # Example
///
/// ```rust
/// use orbitgate_persistence::backends::memory::MemoryManager;
/// use orbitgate_rest::{create_app_with_config, ServerConfig};
///
/// let config = ServerConfig {
///     enable_cors: false,
///     ..Default::default()
/// };
/// let app = create_app_with_config(MemoryManager::new(), config);
/// ```
pub fn create_app_with_config<M>(manager: M, config: ServerConfig) -> Router
where
    M: DatabaseManager + 'static,
{
    create_app_with_shared(Arc::new(manager), config)
}

/// Creates the Axum application around a manager the caller keeps a handle to.
pub fn create_app_with_shared<M>(manager: Arc<M>, config: ServerConfig) -> Router
where
    M: DatabaseManager + 'static,
{
    info!(
        "Creating REST API server with manager: {}",
        manager.backend_name()
    );

    // Create application state
    let state = AppState::new(manager, config.clone());

    // Build the router with all database routes
    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(RequestBodyLimitLayer::new(config.max_body_size))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout),
        ))
        .layer(DefaultBodyLimit::disable());

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    let router = router.layer(service_builder);

    if config.enable_request_id {
        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    } else {
        router
    }
}

/// Turns a handler panic into the fixed failure response.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %message, "handler panicked");
    error::error_response()
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    // Configure origins
    if config.cors_origins == "*" {
        cors = cors.allow_origin(AnyCors);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    if config.cors_methods == "*" {
        cors = cors.allow_methods(AnyCors);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    // Configure headers
    if config.cors_headers == "*" {
        cors = cors.allow_headers(AnyCors);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level`.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "orbitgate_rest={level},orbitgate_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
