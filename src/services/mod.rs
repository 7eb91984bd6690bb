pub mod build_history;
pub mod dashboard_service;
pub mod flank_config;
pub mod results_list;
pub mod test_hierarchy;

pub use build_history::BuildHistoryAggregator;
pub use dashboard_service::DashboardService;
pub use failed_tests::FailedTestExtractor;
pub use flank_config::FlankConfigBuilder;
pub use results_list::TestResultsListMapper;
pub use test_hierarchy::TestHierarchyBuilder;
