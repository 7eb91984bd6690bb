//! Build records as reported by the CI provider and the summaries derived from them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Environment variable name carrying the job name of a triggered test run.
pub const JOB_NAME_ENV: &str = "JOB_NAME";

/// Environment variable name carrying the base64 Flank configuration.
pub const FLANK_CONFIG_ENV: &str = "FLANK_CONFIG";

/// One build as reported by the CI provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBuildRecord {
    pub branch: String,
    pub status_text: String,
    pub commit_hash: String,
    #[serde(default)]
    pub commit_message: Option<String>,
    pub build_number: i64,
    pub slug: String,
    #[serde(default)]
    pub triggered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    /// Environment values the build was originally triggered with.
    #[serde(default)]
    pub environment: Option<Vec<EnvironmentValue>>,
}

impl RawBuildRecord {
    /// Value of an original environment variable, if the build carried it.
    pub fn environment_value(&self, name: &str) -> Option<&str> {
        self.environment
            .as_ref()?
            .iter()
            .find(|env| env.mapped_to == name)
            .map(|env| env.value.as_str())
    }
}

/// A `mapped_to`/`value` pair passed to a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentValue {
    pub mapped_to: String,
    pub value: String,
}

impl EnvironmentValue {
    pub fn new(mapped_to: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            mapped_to: mapped_to.into(),
            value: value.into(),
        }
    }
}

/// Per-build summary shown in the build selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchBuildSummary {
    pub status: String,
    pub commit_hash: String,
    pub commit_message: Option<String>,
    pub build_number: i64,
    pub build_slug: String,
}

/// Distinct branches plus each branch's builds, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildHistory {
    /// Branch names in first-seen order of the raw input.
    pub branches: Vec<String>,
    /// Builds per branch in descending build-number order.
    pub branch_builds: BTreeMap<String, Vec<BranchBuildSummary>>,
}

/// One row of the triggered test-run listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResultModel {
    pub branch: String,
    pub status: String,
    pub commit_hash: String,
    pub triggered_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub build_slug: String,
    pub job_name: Option<String>,
    pub ci_url: String,
}

/// A build artifact as listed by the CI provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSummary {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub artifact_type: Option<String>,
    #[serde(default)]
    pub file_size_bytes: Option<u64>,
}

/// Artifact details including a short-lived download location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDetails {
    pub title: String,
    pub slug: String,
    pub download_url: String,
}
