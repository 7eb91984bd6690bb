//! Test-method manifests
//!
//! The artifact tooling that inspects instrumentation APKs publishes a JSON
//! manifest next to them: `[{"name": "a.b.Class#method", "annotations": [...]}]`.
//! [`ManifestTestMethodSource`] downloads and parses it.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use tracing::{debug, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::RawTestMethod;
use crate::domain::ports::TestMethodSource;

/// Parse a manifest document
pub fn parse_manifest(json: &str) -> DomainResult<Vec<RawTestMethod>> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a manifest from disk
pub fn read_manifest(path: impl AsRef<Path>) -> anyhow::Result<Vec<RawTestMethod>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;
    parse_manifest(&json).with_context(|| format!("Invalid manifest {}", path.display()))
}

/// Downloads test-method manifests over HTTP
pub struct ManifestTestMethodSource {
    http_client: ReqwestClient,
}

impl ManifestTestMethodSource {
    pub fn new(timeout_secs: u64) -> DomainResult<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| DomainError::CiUnavailable(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl TestMethodSource for ManifestTestMethodSource {
    #[instrument(skip(self), err)]
    async fn test_methods(&self, artifact_url: &str) -> DomainResult<Vec<RawTestMethod>> {
        let response = self
            .http_client
            .get(artifact_url)
            .send()
            .await
            .map_err(|e| DomainError::CiUnavailable(format!("Manifest download failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::CiUnavailable(format!(
                "Manifest download returned {status}: {body}"
            )));
        }

        let json = response
            .text()
            .await
            .map_err(|e| DomainError::CiUnavailable(format!("Manifest download failed: {e}")))?;
        let methods = parse_manifest(&json)?;
        debug!(methods = methods.len(), "parsed test manifest");
        Ok(methods)
    }
}
