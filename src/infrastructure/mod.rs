//! Infrastructure layer module
//!
//! This module contains all infrastructure adapters and external integrations:
//! - Bitrise API client
//! - Test-method manifest source
//! - HTTP server
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod bitrise;
pub mod config;
pub mod http;
pub mod logging;
pub mod manifest;
