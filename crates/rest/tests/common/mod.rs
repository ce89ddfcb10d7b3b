//! Common test utilities for REST API testing.
//!
//! - [`harness`] - Test servers and response assertions
//! - [`fixtures`] - Scripted databases and a manager serving them

#![allow(dead_code)]

pub mod fixtures;
pub mod harness;
