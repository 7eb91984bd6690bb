//! Wire types of the Bitrise v0.1 REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::build::{FLANK_CONFIG_ENV, JOB_NAME_ENV};
use crate::domain::models::{
    ArtifactDetails, ArtifactSummary, EnvironmentValue, RawBuildRecord, TriggerResponse,
    WorkflowTriggerData,
};

/// Every read endpoint wraps its payload in `{"data": ...}`.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildData {
    pub slug: String,
    #[serde(default)]
    pub status_text: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub commit_hash: Option<String>,
    #[serde(default)]
    pub commit_message: Option<String>,
    pub build_number: i64,
    #[serde(default)]
    pub triggered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub original_build_params: Option<OriginalBuildParams>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OriginalBuildParams {
    #[serde(default)]
    pub environments: Option<Vec<EnvironmentData>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentData {
    pub mapped_to: String,
    pub value: String,
}

impl From<BuildData> for RawBuildRecord {
    fn from(build: BuildData) -> Self {
        Self {
            branch: build.branch,
            status_text: build.status_text,
            commit_hash: build.commit_hash.unwrap_or_default(),
            commit_message: build.commit_message,
            build_number: build.build_number,
            slug: build.slug,
            triggered_at: build.triggered_at,
            finished_at: build.finished_at,
            environment: build
                .original_build_params
                .and_then(|params| params.environments)
                .map(|environments| {
                    environments
                        .into_iter()
                        .map(|env| EnvironmentValue::new(env.mapped_to, env.value))
                        .collect()
                }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactListItem {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub artifact_type: Option<String>,
    #[serde(default)]
    pub file_size_bytes: Option<u64>,
}

impl From<ArtifactListItem> for ArtifactSummary {
    fn from(item: ArtifactListItem) -> Self {
        Self {
            title: item.title,
            slug: item.slug,
            artifact_type: item.artifact_type,
            file_size_bytes: item.file_size_bytes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactData {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub expiring_download_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TriggerRequest<'a> {
    pub hook_info: HookInfo,
    pub build_params: BuildParams<'a>,
}

#[derive(Debug, Serialize)]
pub struct HookInfo {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Serialize)]
pub struct BuildParams<'a> {
    pub branch: &'a str,
    pub workflow_id: &'a str,
    pub commit_hash: &'a str,
    pub environments: Vec<TriggerEnvironment<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TriggerEnvironment<'a> {
    pub mapped_to: &'static str,
    pub value: &'a str,
    pub is_expand: bool,
}

impl<'a> TriggerRequest<'a> {
    pub fn new(data: &'a WorkflowTriggerData, workflow_id: &'a str) -> Self {
        Self {
            hook_info: HookInfo { kind: "bitrise" },
            build_params: BuildParams {
                branch: &data.branch,
                workflow_id,
                commit_hash: &data.commit_hash,
                environments: vec![
                    TriggerEnvironment {
                        mapped_to: FLANK_CONFIG_ENV,
                        value: &data.flank_config_base64,
                        is_expand: false,
                    },
                    TriggerEnvironment {
                        mapped_to: JOB_NAME_ENV,
                        value: &data.job_name,
                        is_expand: false,
                    },
                ],
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TriggerResponseData {
    pub status: String,
    #[serde(default)]
    pub build_url: String,
}

impl From<TriggerResponseData> for TriggerResponse {
    fn from(response: TriggerResponseData) -> Self {
        Self {
            status: response.status,
            build_url: response.build_url,
        }
    }
}

impl ArtifactData {
    pub fn into_details(self) -> Option<ArtifactDetails> {
        let download_url = self.expiring_download_url?;
        Some(ArtifactDetails {
            title: self.title,
            slug: self.slug,
            download_url,
        })
    }
}
