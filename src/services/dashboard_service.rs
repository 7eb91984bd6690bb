use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    ArtifactSummary, BuildHistory, Config, ConfirmModel, RerunModel, TestDataConfig,
    TestHierarchyResult, TestOption, TestResultModel, TestSelection, TriggerOutcome,
    WorkflowTriggerData,
};
use crate::domain::ports::{CiDataSource, TestMethodSource};
use crate::services::{
    BuildHistoryAggregator, FailedTestExtractor, FlankConfigBuilder, TestHierarchyBuilder,
    TestResultsListMapper,
};

/// Coordinates CI reads and test-run triggers for the dashboard.
///
/// Every operation fetches its inputs in full before handing them to one of
/// the pure mapping engines, and fails as a whole when any fetch fails.
pub struct DashboardService<C, M> {
    ci: Arc<C>,
    test_methods: Arc<M>,
    test_data: TestDataConfig,
    source_workflow: String,
    trigger_workflow: String,
    aggregator: BuildHistoryAggregator,
    hierarchy_builder: TestHierarchyBuilder,
    failed_tests: FailedTestExtractor,
    results_mapper: TestResultsListMapper,
    flank_config: FlankConfigBuilder,
}

impl<C, M> DashboardService<C, M>
where
    C: CiDataSource,
    M: TestMethodSource,
{
    pub fn new(ci: Arc<C>, test_methods: Arc<M>, config: &Config) -> Self {
        Self {
            ci,
            test_methods,
            test_data: config.test_data.clone(),
            source_workflow: config.ci.test_apk_source_workflow.clone(),
            trigger_workflow: config.ci.test_trigger_workflow.clone(),
            aggregator: BuildHistoryAggregator::new(),
            hierarchy_builder: TestHierarchyBuilder::new(),
            failed_tests: FailedTestExtractor::new(),
            results_mapper: TestResultsListMapper::new(&config.ci.build_url_base),
            flank_config: FlankConfigBuilder::new(),
        }
    }

    /// Run options offered next to the test selector.
    pub fn options(&self) -> &[TestOption] {
        &self.test_data.options
    }

    /// Branches and builds of the workflow producing test artifacts.
    #[instrument(skip(self), err)]
    pub async fn branch_builds(&self) -> DomainResult<BuildHistory> {
        let builds = self.ci.get_builds(&self.source_workflow).await?;
        info!(builds = builds.len(), "fetched source builds");
        Ok(self.aggregator.aggregate(&builds))
    }

    #[instrument(skip(self), err)]
    pub async fn artifacts(&self, build_slug: &str) -> DomainResult<Vec<ArtifactSummary>> {
        self.ci.get_artifacts(build_slug).await
    }

    /// Selector hierarchy of the tests inside one build artifact.
    #[instrument(skip(self), err)]
    pub async fn test_metadata(
        &self,
        build_slug: &str,
        artifact_slug: &str,
    ) -> DomainResult<TestHierarchyResult> {
        let artifact = self.ci.get_artifact(build_slug, artifact_slug).await?;
        let methods = self.test_methods.test_methods(&artifact.download_url).await?;
        info!(
            artifact = %artifact.title,
            methods = methods.len(),
            "fetched test methods"
        );
        self.hierarchy_builder
            .build(&methods, &self.test_data.filter_config())
    }

    /// Failed tests of a previous run, with the branch it ran on.
    ///
    /// The build and its report are fetched concurrently; the first failure
    /// cancels the other fetch and is returned as is.
    #[instrument(skip(self), err)]
    pub async fn rerun(&self, build_slug: &str) -> DomainResult<RerunModel> {
        let (build, suites) = tokio::try_join!(
            self.ci.get_build(build_slug),
            self.ci.get_test_results(build_slug),
        )?;

        let failed_tests = self.failed_tests.extract(&suites);
        info!(
            branch = %build.branch,
            failed = failed_tests.len(),
            "collected failed tests"
        );
        Ok(RerunModel {
            branch: build.branch,
            failed_tests,
        })
    }

    /// Runs of the test workflow, newest first as listed by the provider.
    #[instrument(skip(self), err)]
    pub async fn test_results(&self) -> DomainResult<Vec<TestResultModel>> {
        let builds = self.ci.get_builds(&self.trigger_workflow).await?;
        Ok(self.results_mapper.map(&builds))
    }

    /// Compose the trigger payload for `selection` without starting anything.
    #[instrument(skip(self, selection), err)]
    pub fn confirm(&self, selection: &TestSelection) -> DomainResult<ConfirmModel> {
        self.flank_config.build(selection, &self.test_data)
    }

    /// Start the test workflow.
    #[instrument(skip(self, data), fields(branch = %data.branch, job = %data.job_name), err)]
    pub async fn trigger(&self, data: &WorkflowTriggerData) -> DomainResult<TriggerOutcome> {
        let response = self.ci.trigger_workflow(data).await?;
        if response.is_accepted() {
            info!(build_url = %response.build_url, "test run triggered");
            Ok(TriggerOutcome {
                build_url: response.build_url,
            })
        } else {
            warn!(status = %response.status, "CI rejected test run");
            Err(DomainError::TriggerRejected(response.status))
        }
    }
}
