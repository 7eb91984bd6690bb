//! Test selections and the workflow-trigger data composed from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// What the engineer picked in the test selector.
///
/// Required fields are optional here so that an incomplete submission is
/// reported as a named missing field instead of a generic parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestSelection {
    /// Re-runs carry fully-qualified class names taken from a test report.
    pub is_rerun: bool,
    pub branch: Option<String>,
    pub build_slug: Option<String>,
    pub commit_hash: Option<String>,
    pub job_name: Option<String>,
    pub root_package: String,
    pub annotations: Vec<String>,
    pub packages: Vec<String>,
    pub classes: Vec<String>,
    /// Checkbox option index to checked state.
    pub checkbox_options: BTreeMap<usize, bool>,
    /// Drop-down option index to chosen value index.
    pub drop_down_options: BTreeMap<usize, usize>,
}

impl TestSelection {
    pub fn has_filters(&self) -> bool {
        !(self.packages.is_empty() && self.classes.is_empty() && self.annotations.is_empty())
    }
}

/// Fields the CI provider needs to start the test workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowTriggerData {
    pub branch: String,
    pub build_slug: String,
    pub commit_hash: String,
    pub job_name: String,
    pub flank_config_base64: String,
}

/// Trigger data plus the human-readable configuration shown for confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmModel {
    #[serde(flatten)]
    pub trigger: WorkflowTriggerData,
    pub flank_config_yaml: String,
}

/// Raw answer of the CI provider to a trigger request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerResponse {
    pub status: String,
    pub build_url: String,
}

impl TriggerResponse {
    pub fn is_accepted(&self) -> bool {
        self.status == "ok"
    }
}

/// A successfully triggered run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerOutcome {
    pub build_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_without_filters() {
        let selection = TestSelection::default();
        assert!(!selection.has_filters());

        let selection = TestSelection {
            annotations: vec!["Smoke".to_string()],
            ..Default::default()
        };
        assert!(selection.has_filters());
    }

    #[test]
    fn test_selection_deserializes_partial_form() {
        let selection: TestSelection = serde_json::from_str(
            r#"{"branch": "main", "packages": ["e2e"], "checkbox_options": {"0": true}}"#,
        )
        .unwrap();
        assert_eq!(selection.branch.as_deref(), Some("main"));
        assert_eq!(selection.commit_hash, None);
        assert_eq!(selection.checkbox_options.get(&0), Some(&true));
    }

    #[test]
    fn test_confirm_model_flattens_trigger_data() {
        let model = ConfirmModel {
            trigger: WorkflowTriggerData {
                branch: "branch".to_string(),
                build_slug: "slug".to_string(),
                commit_hash: "hash".to_string(),
                job_name: "job".to_string(),
                flank_config_base64: "config".to_string(),
            },
            flank_config_yaml: "gcloud: {}".to_string(),
        };
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["branch"], "branch");
        assert_eq!(json["flank_config_base64"], "config");
    }

    #[test]
    fn test_trigger_response_status() {
        let ok = TriggerResponse {
            status: "ok".to_string(),
            build_url: "url".to_string(),
        };
        let rejected = TriggerResponse {
            status: "not-ok".to_string(),
            build_url: "url".to_string(),
        };
        assert!(ok.is_accepted());
        assert!(!rejected.is_accepted());
    }
}
