//! Route configuration for the orbitgate REST API.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod db_routes;

pub use db_routes::create_routes;
