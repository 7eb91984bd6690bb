use crate::domain::models::build::JOB_NAME_ENV;
use crate::domain::models::{RawBuildRecord, TestResultModel};

/// Maps test-run builds to the rows of the results page.
#[derive(Debug, Clone)]
pub struct TestResultsListMapper {
    build_url_base: String,
}

impl TestResultsListMapper {
    pub fn new(build_url_base: impl Into<String>) -> Self {
        Self {
            build_url_base: build_url_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn map(&self, builds: &[RawBuildRecord]) -> Vec<TestResultModel> {
        builds.iter().map(|build| self.map_build(build)).collect()
    }

    fn map_build(&self, build: &RawBuildRecord) -> TestResultModel {
        TestResultModel {
            branch: build.branch.clone(),
            status: build.status_text.clone(),
            commit_hash: build.commit_hash.clone(),
            triggered_at: build.triggered_at,
            finished_at: build.finished_at,
            build_slug: build.slug.clone(),
            job_name: build.environment_value(JOB_NAME_ENV).map(str::to_string),
            ci_url: format!("{}/{}", self.build_url_base, build.slug),
        }
    }
}
