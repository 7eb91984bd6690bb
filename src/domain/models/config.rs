use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::hierarchy::FilterConfig;

/// Main configuration structure for flankci
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// CI provider (Bitrise) configuration
    #[serde(default)]
    pub ci: CiConfig,

    /// Test selection and Flank configuration
    #[serde(default)]
    pub test_data: TestDataConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// CI provider configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CiConfig {
    /// Base URL of the Bitrise REST API
    #[serde(default = "default_ci_base_url")]
    pub base_url: String,

    /// Bitrise app identifier
    #[serde(default)]
    pub app_id: String,

    /// Personal access token, usually supplied through `BITRISE_TOKEN`
    #[serde(default)]
    pub token: String,

    /// Workflow whose builds produce the test artifact
    #[serde(default)]
    pub test_apk_source_workflow: String,

    /// Workflow that runs the selected tests
    #[serde(default)]
    pub test_trigger_workflow: String,

    /// Title of the JUnit XML artifact produced by test runs
    #[serde(default = "default_junit_artifact_name")]
    pub junit_artifact_name: String,

    /// Prefix of the provider's web page for a build
    #[serde(default = "default_build_url_base")]
    pub build_url_base: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry policy for transient provider errors
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_ci_base_url() -> String {
    "https://api.bitrise.io/v0.1".to_string()
}

fn default_junit_artifact_name() -> String {
    "JUnitReport.xml".to_string()
}

fn default_build_url_base() -> String {
    "https://app.bitrise.io/build".to_string()
}

const fn default_timeout_secs() -> u64 {
    60
}

impl Default for CiConfig {
    fn default() -> Self {
        Self {
            base_url: default_ci_base_url(),
            app_id: String::new(),
            token: String::new(),
            test_apk_source_workflow: String::new(),
            test_trigger_workflow: String::new(),
            junit_artifact_name: default_junit_artifact_name(),
            build_url_base: default_build_url_base(),
            timeout_secs: default_timeout_secs(),
            retry: RetryConfig::default(),
        }
    }
}

impl fmt::Debug for CiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CiConfig")
            .field("base_url", &self.base_url)
            .field("app_id", &self.app_id)
            .field("token", &"[REDACTED]")
            .field("test_apk_source_workflow", &self.test_apk_source_workflow)
            .field("test_trigger_workflow", &self.test_trigger_workflow)
            .field("junit_artifact_name", &self.junit_artifact_name)
            .field("build_url_base", &self.build_url_base)
            .field("timeout_secs", &self.timeout_secs)
            .field("retry", &self.retry)
            .finish()
    }
}

/// Retry policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    500
}

const fn default_max_backoff_ms() -> u64 {
    10_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

/// Test selection configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TestDataConfig {
    /// Annotations hidden from the selector (tests are kept)
    #[serde(default)]
    pub hidden_annotations: Vec<String>,

    /// Annotations that remove a test from the selector entirely
    #[serde(default)]
    pub ignore_tests_with_annotations: Vec<String>,

    /// Allow triggering a run without any package, class or annotation filter
    #[serde(default)]
    pub allow_testing_without_filters: bool,

    /// YAML fragments composed into the Flank configuration
    #[serde(default)]
    pub flank_config: FlankConfig,

    /// Extra run options shown next to the selector
    #[serde(default)]
    pub options: Vec<TestOption>,
}

impl TestDataConfig {
    pub fn filter_config(&self) -> FilterConfig {
        FilterConfig {
            hidden_annotations: self.hidden_annotations.clone(),
            ignore_tests_with_annotations: self.ignore_tests_with_annotations.clone(),
            allow_testing_without_filters: self.allow_testing_without_filters,
        }
    }
}

/// Flank YAML building blocks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FlankConfig {
    /// Fragments applied to every run
    #[serde(default)]
    pub common_yaml: Vec<String>,

    /// Fragments chosen by the selected annotations
    #[serde(default)]
    pub annotation_based_yaml: AnnotationBasedYaml,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnnotationBasedYaml {
    #[serde(default)]
    pub options: Vec<AnnotationYaml>,

    /// Used when no selected annotation has its own fragments
    #[serde(default)]
    pub fallback_yaml: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnnotationYaml {
    pub annotation: String,
    #[serde(default)]
    pub yaml: Vec<String>,
}

/// A run option rendered as a checkbox or a drop-down
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TestOption {
    Checkbox {
        label: String,
        #[serde(default)]
        checked_yaml: Vec<String>,
        #[serde(default)]
        unchecked_yaml: Vec<String>,
    },
    DropDown {
        label: String,
        values: Vec<DropDownValue>,
    },
}

impl TestOption {
    pub fn label(&self) -> &str {
        match self {
            Self::Checkbox { label, .. } | Self::DropDown { label, .. } => label,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DropDownValue {
    pub label: String,
    #[serde(default)]
    pub yaml: Vec<String>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8080
}

const fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Rotation of log files: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
