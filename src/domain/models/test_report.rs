//! Structured test reports and the failed-test list derived from them.

use serde::{Deserialize, Serialize};

/// One test suite of a report. A suite may carry no cases at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSuite {
    pub name: Option<String>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

/// One executed test method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub class_name: String,
    pub method_name: String,
    #[serde(default)]
    pub failure: Option<TestFailure>,
}

impl TestCase {
    pub fn passed(class_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            failure: None,
        }
    }

    pub fn failed(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            failure: Some(TestFailure { message }),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// `ClassName#methodName`
    pub fn identifier(&self) -> String {
        format!("{}#{}", self.class_name, self.method_name)
    }
}

/// Failure marker attached to a test case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestFailure {
    pub message: Option<String>,
}

/// Sorted, deduplicated `ClassName#methodName` identifiers of failed tests.
pub type FailedTestList = Vec<String>;

/// Data needed to pre-populate a re-run of a previous build's failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RerunModel {
    pub branch: String,
    pub failed_tests: FailedTestList,
}
