//! Application state for the orbitgate REST API.
//!
//! The state holds the database manager and the server configuration. It is
//! cloned into every request; both members sit behind `Arc`.

use std::sync::Arc;

use orbitgate_persistence::core::{DatabaseHandle, DatabaseManager};
use orbitgate_persistence::types::OpenOptions;
use tracing::debug;

use crate::config::ServerConfig;
use crate::error::RestResult;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `M` - The database manager (must implement [`DatabaseManager`])
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use orbitgate_persistence::backends::memory::MemoryManager;
/// use orbitgate_rest::{AppState, ServerConfig};
///
/// let state = AppState::new(Arc::new(MemoryManager::new()), ServerConfig::default());
/// assert_eq!(state.default_db_type(), "keyvalue");
/// ```
pub struct AppState<M> {
    /// The database manager.
    manager: Arc<M>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since M is wrapped in Arc and doesn't need to be Clone
impl<M> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            manager: Arc::clone(&self.manager),
            config: Arc::clone(&self.config),
        }
    }
}

impl<M: DatabaseManager> AppState<M> {
    /// Creates a new AppState with the given manager and configuration.
    pub fn new(manager: Arc<M>, config: ServerConfig) -> Self {
        Self {
            manager,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the database manager.
    pub fn manager(&self) -> &M {
        &self.manager
    }

    /// Returns the type tag used when a create request names none.
    pub fn default_db_type(&self) -> &str {
        &self.config.default_db_type
    }

    /// Resolves a database the manager already knows, opening it if needed.
    pub async fn open_existing(&self, name: &str) -> RestResult<DatabaseHandle> {
        debug!(database = %name, "resolving database");
        Ok(self.manager.resolve(name, OpenOptions::existing()).await?)
    }
}
