//! CI provider port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    ArtifactDetails, ArtifactSummary, RawBuildRecord, TestSuite, TriggerResponse,
    WorkflowTriggerData,
};

/// Read and trigger access to the CI provider.
///
/// Implementations own transport concerns (authentication, retries,
/// envelopes); every method returns fully materialized data so the mapping
/// engines never observe a partially fetched response.
#[async_trait]
pub trait CiDataSource: Send + Sync {
    /// Builds of `workflow`, in the order the provider lists them.
    async fn get_builds(&self, workflow: &str) -> DomainResult<Vec<RawBuildRecord>>;

    /// A single build by slug.
    async fn get_build(&self, build_slug: &str) -> DomainResult<RawBuildRecord>;

    /// Artifacts attached to a build.
    async fn get_artifacts(&self, build_slug: &str) -> DomainResult<Vec<ArtifactSummary>>;

    /// Details of one artifact, including where to download it.
    async fn get_artifact(
        &self,
        build_slug: &str,
        artifact_slug: &str,
    ) -> DomainResult<ArtifactDetails>;

    /// Test report produced by a test-run build.
    async fn get_test_results(&self, build_slug: &str) -> DomainResult<Vec<TestSuite>>;

    /// Start the test workflow.
    async fn trigger_workflow(&self, data: &WorkflowTriggerData) -> DomainResult<TriggerResponse>;
}
