//! HTTP adapter exposing the dashboard service.

pub mod server;

pub use server::{DashboardHttpConfig, DashboardHttpServer, ErrorResponse};
