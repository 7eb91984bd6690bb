//! flankci - CI dashboard backend
//!
//! flankci reads build history and JUnit reports from Bitrise, turns the
//! instrumented-test methods of a build artifact into a selectable
//! package/class/method hierarchy, and triggers Flank test runs for the
//! chosen selection.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, errors and port traits
//! - **Service Layer** (`services`): Pure mapping engines and the dashboard orchestration
//! - **Infrastructure Layer** (`infrastructure`): Bitrise client, manifests, HTTP server, config, logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```
//! use flankci::{FilterConfig, RawTestMethod, TestHierarchyBuilder};
//!
//! let methods = vec![RawTestMethod::new("com.example.LoginTest#logsIn", ["Smoke"])];
//! let hierarchy = TestHierarchyBuilder::new()
//!     .build(&methods, &FilterConfig::default())
//!     .unwrap();
//! assert_eq!(hierarchy.root_package, "com.example");
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    AnnotationGroup, BranchBuildSummary, BuildHistory, Config, FailedTestList, FilterConfig,
    PathWithAnnotationGroups, RawBuildRecord, RawTestMethod, TestCase, TestHierarchyResult,
    TestSuite,
};
pub use domain::ports::{CiDataSource, TestMethodSource};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    BuildHistoryAggregator, DashboardService, FailedTestExtractor, FlankConfigBuilder,
    TestHierarchyBuilder,
};
