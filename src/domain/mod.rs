//! Domain layer for flankci
//!
//! This module contains the domain models, the port traits adapters
//! implement, and the error type shared by every layer.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
