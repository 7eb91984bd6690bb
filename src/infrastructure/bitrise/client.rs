use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client as ReqwestClient, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use super::errors::BitriseApiError;
use super::junit;
use super::models::{
    ArtifactData, ArtifactListItem, BuildData, DataEnvelope, TriggerRequest, TriggerResponseData,
};
use super::retry::RetryPolicy;
use crate::domain::errors::DomainResult;
use crate::domain::models::{
    ArtifactDetails, ArtifactSummary, CiConfig, RawBuildRecord, TestSuite, TriggerResponse,
    WorkflowTriggerData,
};
use crate::domain::ports::CiDataSource;

/// HTTP client for the Bitrise v0.1 API
///
/// Reads are retried with exponential backoff on transient failures.
/// Trigger requests are sent exactly once.
pub struct BitriseClient {
    http_client: ReqwestClient,
    base_url: String,
    app_id: String,
    token: String,
    trigger_workflow: String,
    junit_artifact_name: String,
    retry_policy: RetryPolicy,
}

impl BitriseClient {
    /// Create a client from the `ci` configuration section
    ///
    /// Fails with [`BitriseApiError::MissingCredentials`] when the app id or
    /// access token is empty.
    pub fn new(config: &CiConfig) -> Result<Self, BitriseApiError> {
        if config.app_id.trim().is_empty() {
            return Err(BitriseApiError::MissingCredentials("ci.app_id"));
        }
        if config.token.trim().is_empty() {
            return Err(BitriseApiError::MissingCredentials("ci.token"));
        }

        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(10)
            .build()?;

        info!(
            base_url = %config.base_url,
            app_id = %config.app_id,
            token = %redact(&config.token),
            "Bitrise client configured"
        );

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_id: config.app_id.clone(),
            token: config.token.clone(),
            trigger_workflow: config.test_trigger_workflow.clone(),
            junit_artifact_name: config.junit_artifact_name.clone(),
            retry_policy: RetryPolicy::from(&config.retry),
        })
    }

    fn app_url(&self) -> String {
        format!("{}/apps/{}", self.base_url, self.app_id)
    }

    /// GET an authenticated JSON endpoint, retrying transient failures
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, BitriseApiError> {
        self.retry_policy
            .execute(|| async {
                debug!(url, "GET");
                let response = self
                    .http_client
                    .get(url)
                    .header(AUTHORIZATION, &self.token)
                    .query(query)
                    .send()
                    .await?;
                let response = error_for_status(response).await?;
                Ok::<T, BitriseApiError>(response.json::<T>().await?)
            })
            .await
    }

    /// Download an artifact body from its pre-signed URL
    async fn download_text(&self, url: &str) -> Result<String, BitriseApiError> {
        self.retry_policy
            .execute(|| async {
                let response = self.http_client.get(url).send().await?;
                let response = error_for_status(response).await?;
                Ok::<String, BitriseApiError>(response.text().await?)
            })
            .await
    }

    async fn artifact_list(&self, build_slug: &str) -> Result<Vec<ArtifactListItem>, BitriseApiError> {
        let url = format!("{}/builds/{build_slug}/artifacts", self.app_url());
        let envelope: DataEnvelope<Vec<ArtifactListItem>> = self.get_json(&url, &[]).await?;
        Ok(envelope.data)
    }

    async fn artifact(
        &self,
        build_slug: &str,
        artifact_slug: &str,
    ) -> Result<ArtifactDetails, BitriseApiError> {
        let url = format!(
            "{}/builds/{build_slug}/artifacts/{artifact_slug}",
            self.app_url()
        );
        let envelope: DataEnvelope<ArtifactData> = self.get_json(&url, &[]).await?;
        envelope.data.into_details().ok_or_else(|| {
            BitriseApiError::NotFound(format!("download URL of artifact {artifact_slug}"))
        })
    }
}

async fn error_for_status(response: Response) -> Result<Response, BitriseApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error response".to_string());
    Err(BitriseApiError::from_status(status, body))
}

/// First characters of a secret, safe to log
fn redact(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    format!("{prefix}***")
}

#[async_trait]
impl CiDataSource for BitriseClient {
    #[instrument(skip(self), err)]
    async fn get_builds(&self, workflow: &str) -> DomainResult<Vec<RawBuildRecord>> {
        let url = format!("{}/builds", self.app_url());
        let envelope: DataEnvelope<Vec<BuildData>> = self
            .get_json(&url, &[("workflow", workflow), ("sort_by", "created_at")])
            .await?;
        Ok(envelope.data.into_iter().map(RawBuildRecord::from).collect())
    }

    #[instrument(skip(self), err)]
    async fn get_build(&self, build_slug: &str) -> DomainResult<RawBuildRecord> {
        let url = format!("{}/builds/{build_slug}", self.app_url());
        let envelope: DataEnvelope<BuildData> = self.get_json(&url, &[]).await?;
        Ok(envelope.data.into())
    }

    #[instrument(skip(self), err)]
    async fn get_artifacts(&self, build_slug: &str) -> DomainResult<Vec<ArtifactSummary>> {
        let artifacts = self.artifact_list(build_slug).await?;
        Ok(artifacts.into_iter().map(ArtifactSummary::from).collect())
    }

    #[instrument(skip(self), err)]
    async fn get_artifact(
        &self,
        build_slug: &str,
        artifact_slug: &str,
    ) -> DomainResult<ArtifactDetails> {
        Ok(self.artifact(build_slug, artifact_slug).await?)
    }

    #[instrument(skip(self), err)]
    async fn get_test_results(&self, build_slug: &str) -> DomainResult<Vec<TestSuite>> {
        let report = self
            .artifact_list(build_slug)
            .await?
            .into_iter()
            .find(|artifact| artifact.title == self.junit_artifact_name)
            .ok_or_else(|| BitriseApiError::ArtifactMissing {
                build_slug: build_slug.to_string(),
                name: self.junit_artifact_name.clone(),
            })?;

        let details = self.artifact(build_slug, &report.slug).await?;
        let xml = self.download_text(&details.download_url).await?;
        Ok(junit::parse_report(&xml)?)
    }

    #[instrument(skip(self, data), fields(branch = %data.branch, job = %data.job_name), err)]
    async fn trigger_workflow(&self, data: &WorkflowTriggerData) -> DomainResult<TriggerResponse> {
        let url = format!("{}/builds", self.app_url());
        let request = TriggerRequest::new(data, &self.trigger_workflow);

        let response = self
            .http_client
            .post(&url)
            .header(AUTHORIZATION, &self.token)
            .json(&request)
            .send()
            .await
            .map_err(BitriseApiError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(BitriseApiError::from)?;

        // Rejections still carry a status field worth reporting.
        match serde_json::from_str::<TriggerResponseData>(&body) {
            Ok(parsed) if status.is_success() || status.is_client_error() => Ok(parsed.into()),
            Err(err) if status.is_success() => Err(BitriseApiError::from(err).into()),
            _ => Err(BitriseApiError::from_status(status, body).into()),
        }
    }
}
