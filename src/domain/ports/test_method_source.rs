use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::RawTestMethod;

/// Source of the test methods contained in a test artifact.
#[async_trait]
pub trait TestMethodSource: Send + Sync {
    /// Test methods of the artifact downloadable from `artifact_url`.
    async fn test_methods(&self, artifact_url: &str) -> DomainResult<Vec<RawTestMethod>>;
}
