//! Bitrise CI adapter
//!
//! Implements [`CiDataSource`](crate::domain::ports::CiDataSource) over the
//! Bitrise REST API, including JUnit report download and workflow triggers.

pub mod client;
pub mod errors;
pub mod junit;
pub mod models;
pub mod retry;

pub use client::BitriseClient;
pub use errors::BitriseApiError;
pub use retry::RetryPolicy;
