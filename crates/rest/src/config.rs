//! Server configuration for the orbitgate REST API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ORBITGATE_PORT` | 3000 | Server port |
//! | `ORBITGATE_HOST` | 127.0.0.1 | Host to bind |
//! | `ORBITGATE_LOG_LEVEL` | info | Log level |
//! | `ORBITGATE_MAX_BODY_SIZE` | 10485760 | Max request body (bytes) |
//! | `ORBITGATE_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `ORBITGATE_ENABLE_CORS` | true | Enable CORS |
//! | `ORBITGATE_CORS_ORIGINS` | * | Allowed origins |
//! | `ORBITGATE_CORS_METHODS` | GET,POST,PUT,DELETE,OPTIONS | Allowed methods |
//! | `ORBITGATE_CORS_HEADERS` | Content-Type,Accept | Allowed headers |
//! | `ORBITGATE_ENABLE_REQUEST_ID` | true | Set and propagate `x-request-id` |
//! | `ORBITGATE_DEFAULT_DB_TYPE` | keyvalue | Type used when a create names none |
//! | `ORBITGATE_DATABASES` | | Databases to declare, `name:type,...` |
//!
//! # Example
//!
//! ```rust
//! use orbitgate_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 8080,
//!     databases: vec!["events:eventlog".to_string()],
//!     ..Default::default()
//! };
//! let declared = config.declared_databases().unwrap();
//! assert_eq!(declared[0].0, "events");
//! ```

use clap::Parser;
use orbitgate_persistence::types::DatabaseType;

/// Server configuration for the orbitgate REST API.
///
/// This struct can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "orbitgate")]
#[command(about = "HTTP API over dynamically opened databases")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "ORBITGATE_PORT", default_value = "3000")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "ORBITGATE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "ORBITGATE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "ORBITGATE_MAX_BODY_SIZE", default_value = "10485760")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "ORBITGATE_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "ORBITGATE_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "ORBITGATE_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "ORBITGATE_CORS_METHODS",
        default_value = "GET,POST,PUT,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(long, env = "ORBITGATE_CORS_HEADERS", default_value = "Content-Type,Accept")]
    pub cors_headers: String,

    /// Enable request ID tracking.
    #[arg(long, env = "ORBITGATE_ENABLE_REQUEST_ID", default_value = "true")]
    pub enable_request_id: bool,

    /// Database type used when a create request does not name one.
    #[arg(long, env = "ORBITGATE_DEFAULT_DB_TYPE", default_value = "keyvalue")]
    pub default_db_type: String,

    /// Databases to declare at startup, as `name:type` pairs.
    #[arg(
        long = "database",
        env = "ORBITGATE_DATABASES",
        value_delimiter = ','
    )]
    pub databases: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 10 * 1024 * 1024, // 10MB
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PUT,DELETE,OPTIONS".to_string(),
            cors_headers: "Content-Type,Accept".to_string(),
            enable_request_id: true,
            default_db_type: "keyvalue".to_string(),
            databases: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        Self::try_parse_from(["orbitgate"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parses the `name:type` declarations.
    pub fn declared_databases(&self) -> Result<Vec<(String, DatabaseType)>, String> {
        self.databases
            .iter()
            .map(|spec| spec.trim())
            .filter(|spec| !spec.is_empty())
            .map(|spec| {
                let (name, tag) = spec
                    .split_once(':')
                    .ok_or_else(|| format!("Database declaration '{}' must be name:type", spec))?;
                let name = name.trim();
                if name.is_empty() {
                    return Err(format!("Database declaration '{}' has an empty name", spec));
                }
                let db_type = tag.parse::<DatabaseType>()?;
                Ok((name.to_string(), db_type))
            })
            .collect()
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if let Err(e) = self.default_db_type.parse::<DatabaseType>() {
            errors.push(format!("Invalid default database type: {}", e));
        }

        if let Err(e) = self.declared_databases() {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0 and disables features that might interfere
    /// with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            max_body_size: 1024 * 1024,
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            enable_request_id: false,
            default_db_type: "keyvalue".to_string(),
            databases: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.default_db_type, "keyvalue");
        assert!(config.enable_cors);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 8080,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_validate_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().iter().any(|e| e.contains("Port")));
    }

    #[test]
    fn test_validate_invalid_default_type() {
        let config = ServerConfig {
            default_db_type: "graph".to_string(),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("default database type")));
    }

    #[test]
    fn test_declared_databases() {
        let config = ServerConfig {
            databases: vec![
                "events:eventlog".to_string(),
                " people : DocStore ".to_string(),
                "".to_string(),
            ],
            ..Default::default()
        };
        let declared = config.declared_databases().unwrap();
        assert_eq!(
            declared,
            vec![
                ("events".to_string(), DatabaseType::EventLog),
                ("people".to_string(), DatabaseType::DocStore),
            ]
        );
    }

    #[test]
    fn test_declared_databases_errors() {
        for bad in ["events", ":feed", "events:graph"] {
            let config = ServerConfig {
                databases: vec![bad.to_string()],
                ..Default::default()
            };
            assert!(config.declared_databases().is_err(), "{}", bad);
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_parse_from_args() {
        let config = ServerConfig::parse_from([
            "orbitgate",
            "--port",
            "4000",
            "--database",
            "a:feed,b:counter",
        ]);
        assert_eq!(config.port, 4000);
        assert_eq!(config.databases, vec!["a:feed", "b:counter"]);
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert!(!config.enable_cors);
        assert!(!config.enable_request_id);
    }
}
