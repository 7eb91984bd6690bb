//! Shared fixtures for integration tests: in-memory ports and record builders.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use flankci::domain::models::{
    ArtifactDetails, ArtifactSummary, Config, EnvironmentValue, RawBuildRecord, RawTestMethod,
    TestSuite, TriggerResponse, WorkflowTriggerData,
};
use flankci::domain::ports::{CiDataSource, TestMethodSource};
use flankci::{DomainError, DomainResult};

pub const SOURCE_WORKFLOW: &str = "build-test-apks";
pub const TRIGGER_WORKFLOW: &str = "run-flank";

pub fn build(branch: &str, build_number: i64) -> RawBuildRecord {
    RawBuildRecord {
        branch: branch.to_string(),
        status_text: "success".to_string(),
        commit_hash: format!("commit-{build_number}"),
        commit_message: Some(format!("Change {build_number}")),
        build_number,
        slug: format!("slug-{build_number}"),
        triggered_at: None,
        finished_at: None,
        environment: None,
    }
}

pub fn test_run(branch: &str, build_number: i64, job_name: &str) -> RawBuildRecord {
    RawBuildRecord {
        environment: Some(vec![EnvironmentValue::new("JOB_NAME", job_name)]),
        ..build(branch, build_number)
    }
}

pub fn method(name: &str, annotations: &[&str]) -> RawTestMethod {
    RawTestMethod::new(name, annotations.iter().copied())
}

/// Configuration with both workflows set and one annotation hidden
pub fn config() -> Config {
    let mut config = Config::default();
    config.ci.test_apk_source_workflow = SOURCE_WORKFLOW.to_string();
    config.ci.test_trigger_workflow = TRIGGER_WORKFLOW.to_string();
    config.test_data.hidden_annotations = vec!["Hidden".to_string()];
    config.test_data.ignore_tests_with_annotations = vec!["Ignore".to_string()];
    config.test_data.flank_config.common_yaml = vec!["gcloud:\n  device:\n    - model: Pixel2".to_string()];
    config
}

/// In-memory CI provider
#[derive(Default)]
pub struct FakeCi {
    pub builds: HashMap<String, Vec<RawBuildRecord>>,
    pub artifacts: HashMap<String, Vec<ArtifactSummary>>,
    pub reports: HashMap<String, Vec<TestSuite>>,
    pub trigger_status: Option<String>,
    pub unavailable: bool,
    pub triggered: Mutex<Vec<WorkflowTriggerData>>,
}

impl FakeCi {
    fn check_available(&self) -> DomainResult<()> {
        if self.unavailable {
            Err(DomainError::CiUnavailable("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CiDataSource for FakeCi {
    async fn get_builds(&self, workflow: &str) -> DomainResult<Vec<RawBuildRecord>> {
        self.check_available()?;
        Ok(self.builds.get(workflow).cloned().unwrap_or_default())
    }

    async fn get_build(&self, build_slug: &str) -> DomainResult<RawBuildRecord> {
        self.check_available()?;
        self.builds
            .values()
            .flatten()
            .find(|build| build.slug == build_slug)
            .cloned()
            .ok_or_else(|| DomainError::ArtifactNotFound(format!("build {build_slug}")))
    }

    async fn get_artifacts(&self, build_slug: &str) -> DomainResult<Vec<ArtifactSummary>> {
        self.check_available()?;
        Ok(self.artifacts.get(build_slug).cloned().unwrap_or_default())
    }

    async fn get_artifact(
        &self,
        build_slug: &str,
        artifact_slug: &str,
    ) -> DomainResult<ArtifactDetails> {
        self.check_available()?;
        self.artifacts
            .get(build_slug)
            .and_then(|artifacts| artifacts.iter().find(|a| a.slug == artifact_slug))
            .map(|artifact| ArtifactDetails {
                title: artifact.title.clone(),
                slug: artifact.slug.clone(),
                download_url: format!("https://storage.test/{artifact_slug}"),
            })
            .ok_or_else(|| DomainError::ArtifactNotFound(artifact_slug.to_string()))
    }

    async fn get_test_results(&self, build_slug: &str) -> DomainResult<Vec<TestSuite>> {
        self.check_available()?;
        self.reports
            .get(build_slug)
            .cloned()
            .ok_or_else(|| DomainError::ArtifactNotFound(format!("report of {build_slug}")))
    }

    async fn trigger_workflow(&self, data: &WorkflowTriggerData) -> DomainResult<TriggerResponse> {
        self.check_available()?;
        self.triggered.lock().unwrap().push(data.clone());
        let status = self.trigger_status.clone().unwrap_or_else(|| "ok".to_string());
        Ok(TriggerResponse {
            build_url: if status == "ok" {
                "https://app.bitrise.io/build/new".to_string()
            } else {
                String::new()
            },
            status,
        })
    }
}

/// Test-method source serving fixed manifests by download URL
#[derive(Default)]
pub struct FakeManifests {
    pub manifests: HashMap<String, Vec<RawTestMethod>>,
}

#[async_trait]
impl TestMethodSource for FakeManifests {
    async fn test_methods(&self, artifact_url: &str) -> DomainResult<Vec<RawTestMethod>> {
        self.manifests
            .get(artifact_url)
            .cloned()
            .ok_or_else(|| DomainError::CiUnavailable(format!("no manifest at {artifact_url}")))
    }
}
