pub mod annotations;
pub mod build;
pub mod config;
pub mod hierarchy;
pub mod test_method;
pub mod test_report;
pub mod trigger;

pub use annotations::{AnnotationGroup, AnnotationGroups};
pub use build::{
    ArtifactDetails, ArtifactSummary, BranchBuildSummary, BuildHistory, EnvironmentValue,
    RawBuildRecord, TestResultModel,
};
pub use config::{
    CiConfig, Config, FlankConfig, LoggingConfig, RetryConfig, ServerConfig, TestDataConfig,
    TestOption,
};
pub use hierarchy::{FilterConfig, PathWithAnnotationGroups, TestHierarchyResult};
pub use test_method::{QualifiedTestName, RawTestMethod};
pub use test_report::{FailedTestList, RerunModel, TestCase, TestFailure, TestSuite};
pub use trigger::{
    ConfirmModel, TestSelection, TriggerOutcome, TriggerResponse, WorkflowTriggerData,
};
