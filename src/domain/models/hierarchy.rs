//! Package/class hierarchy served to the test selector.

use serde::{Deserialize, Serialize};

use super::annotations::AnnotationGroup;

/// Annotation filters applied before the hierarchy is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Stripped from display and grouping; the tests themselves are kept.
    #[serde(default)]
    pub hidden_annotations: Vec<String>,
    /// Any test carrying one of these is removed entirely.
    #[serde(default)]
    pub ignore_tests_with_annotations: Vec<String>,
    /// Whether a run may be triggered with no package, class or annotation filter.
    #[serde(default)]
    pub allow_testing_without_filters: bool,
}

/// A path relative to the root package plus the annotation combinations
/// observed on the tests beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathWithAnnotationGroups {
    pub path: String,
    pub annotation_groups: Option<Vec<AnnotationGroup>>,
}

impl PathWithAnnotationGroups {
    pub fn new(path: impl Into<String>, annotation_groups: Option<Vec<AnnotationGroup>>) -> Self {
        Self {
            path: path.into(),
            annotation_groups,
        }
    }
}

/// Result of building the test hierarchy for one artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestHierarchyResult {
    pub root_package: String,
    pub annotations: Vec<String>,
    pub packages: Vec<PathWithAnnotationGroups>,
    pub classes: Vec<PathWithAnnotationGroups>,
}

impl TestHierarchyResult {
    /// True for the result of an artifact with no retained test methods.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
