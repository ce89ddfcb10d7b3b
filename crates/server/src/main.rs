//! Orbitgate
//!
//! HTTP gateway over named, dynamically opened databases.

use std::sync::Arc;

use clap::Parser;
use orbitgate_persistence::backends::memory::MemoryManager;
use orbitgate_persistence::core::DatabaseManager;
use orbitgate_rest::{ServerConfig, create_app_with_shared, init_logging};
use tracing::info;

/// Creates the in-memory manager and registers the configured databases.
///
/// Declared databases are opened on first use.
fn create_manager(config: &ServerConfig) -> anyhow::Result<MemoryManager> {
    let manager = MemoryManager::new();
    let declared = config
        .declared_databases()
        .map_err(|e| anyhow::anyhow!("Invalid database declaration: {}", e))?;

    for (name, db_type) in declared {
        manager.declare(&name, db_type)?;
        info!(database = %name, db_type = %db_type, "Declared database");
    }

    Ok(manager)
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let manager = Arc::new(create_manager(&config)?);

    info!(
        port = config.port,
        host = %config.host,
        backend = manager.backend_name(),
        databases = manager.len(),
        default_db_type = %config.default_db_type,
        "Starting Orbitgate"
    );

    let app = create_app_with_shared(manager, config.clone());
    serve(app, &config).await
}
