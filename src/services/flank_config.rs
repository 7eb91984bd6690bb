//! Composition of the Flank configuration a test run is triggered with.
//!
//! The configured YAML fragments are deep-merged in a fixed order:
//! common fragments, annotation-based fragments, then one fragment per run
//! option. The selected test targets are written last under
//! `gcloud.test-targets`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_yaml::{Mapping, Value};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    ConfirmModel, TestDataConfig, TestOption, TestSelection, WorkflowTriggerData,
};

const GCLOUD_KEY: &str = "gcloud";
const TEST_TARGETS_KEY: &str = "test-targets";

/// Turns a test selection into the trigger payload shown for confirmation.
#[derive(Debug, Clone, Default)]
pub struct FlankConfigBuilder;

impl FlankConfigBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Validate `selection` and compose its Flank configuration.
    ///
    /// # Errors
    ///
    /// - `MissingFormField` when branch, build slug, commit hash or job name
    ///   is absent or blank
    /// - `NoTestFilters` when nothing is selected and
    ///   `allow_testing_without_filters` is off
    /// - `InvalidOption` when an option index or value is out of range
    /// - `SerializationError` when a configured fragment is not valid YAML
    pub fn build(
        &self,
        selection: &TestSelection,
        test_data: &TestDataConfig,
    ) -> DomainResult<ConfirmModel> {
        let branch = required(selection.branch.as_deref(), "Branch")?;
        let build_slug = required(selection.build_slug.as_deref(), "Build slug")?;
        let commit_hash = required(selection.commit_hash.as_deref(), "Commit hash")?;
        let job_name = required(selection.job_name.as_deref(), "Job name")?;

        if !selection.has_filters() && !test_data.allow_testing_without_filters {
            return Err(DomainError::NoTestFilters);
        }

        let mut config = Value::Mapping(Mapping::new());
        for fragment in fragments(selection, test_data)? {
            merge(&mut config, parse_fragment(fragment)?);
        }

        let targets = test_targets(selection);
        if !targets.is_empty() {
            set_test_targets(&mut config, targets);
        }

        let flank_config_yaml = serde_yaml::to_string(&config)?;
        let flank_config_base64 = STANDARD.encode(flank_config_yaml.as_bytes());

        tracing::debug!(
            branch = %branch,
            build_slug = %build_slug,
            rerun = selection.is_rerun,
            "composed flank configuration"
        );

        Ok(ConfirmModel {
            trigger: WorkflowTriggerData {
                branch,
                build_slug,
                commit_hash,
                job_name,
                flank_config_base64,
            },
            flank_config_yaml,
        })
    }
}

fn required(value: Option<&str>, field: &'static str) -> DomainResult<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(DomainError::MissingFormField(field))
}

/// YAML fragments in merge order.
fn fragments<'a>(
    selection: &TestSelection,
    test_data: &'a TestDataConfig,
) -> DomainResult<Vec<&'a str>> {
    let flank = &test_data.flank_config;
    let mut fragments: Vec<&str> = flank.common_yaml.iter().map(String::as_str).collect();

    let annotation_yaml: Vec<&str> = flank
        .annotation_based_yaml
        .options
        .iter()
        .filter(|option| selection.annotations.contains(&option.annotation))
        .flat_map(|option| option.yaml.iter().map(String::as_str))
        .collect();
    if annotation_yaml.is_empty() {
        fragments.extend(
            flank
                .annotation_based_yaml
                .fallback_yaml
                .iter()
                .map(String::as_str),
        );
    } else {
        fragments.extend(annotation_yaml);
    }

    check_option_indices(selection, &test_data.options)?;

    for (index, option) in test_data.options.iter().enumerate() {
        match option {
            TestOption::Checkbox {
                checked_yaml,
                unchecked_yaml,
                ..
            } => {
                let checked = selection
                    .checkbox_options
                    .get(&index)
                    .copied()
                    .unwrap_or(false);
                let yaml = if checked { checked_yaml } else { unchecked_yaml };
                fragments.extend(yaml.iter().map(String::as_str));
            }
            TestOption::DropDown { label, values } => {
                let chosen = selection.drop_down_options.get(&index).copied().unwrap_or(0);
                match values.get(chosen) {
                    Some(value) => fragments.extend(value.yaml.iter().map(String::as_str)),
                    None if values.is_empty() => {}
                    None => {
                        return Err(DomainError::InvalidOption(format!(
                            "'{label}' has no value {chosen}"
                        )))
                    }
                }
            }
        }
    }

    Ok(fragments)
}

fn check_option_indices(selection: &TestSelection, options: &[TestOption]) -> DomainResult<()> {
    for index in selection.checkbox_options.keys() {
        if !matches!(options.get(*index), Some(TestOption::Checkbox { .. })) {
            return Err(DomainError::InvalidOption(format!(
                "option {index} is not a checkbox"
            )));
        }
    }
    for index in selection.drop_down_options.keys() {
        if !matches!(options.get(*index), Some(TestOption::DropDown { .. })) {
            return Err(DomainError::InvalidOption(format!(
                "option {index} is not a drop-down"
            )));
        }
    }
    Ok(())
}

fn parse_fragment(fragment: &str) -> DomainResult<Value> {
    match serde_yaml::from_str::<Value>(fragment)? {
        Value::Null => Ok(Value::Mapping(Mapping::new())),
        value => Ok(value),
    }
}

/// Recursively merge `overlay` into `base`. Mappings merge key by key; any
/// other value in `overlay` replaces the one in `base`.
fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// One `test-targets` entry per selected filter kind.
fn test_targets(selection: &TestSelection) -> Vec<String> {
    let mut targets = Vec::new();

    if !selection.packages.is_empty() {
        let packages: Vec<String> = selection
            .packages
            .iter()
            .map(|package| qualify(&selection.root_package, package))
            .collect();
        targets.push(format!("package {}", packages.join(",")));
    }

    if !selection.classes.is_empty() {
        let classes: Vec<String> = if selection.is_rerun {
            selection.classes.clone()
        } else {
            selection
                .classes
                .iter()
                .map(|class| qualify(&selection.root_package, class))
                .collect()
        };
        targets.push(format!("class {}", classes.join(",")));
    }

    if !selection.annotations.is_empty() {
        targets.push(format!("annotation {}", selection.annotations.join(",")));
    }

    targets
}

fn qualify(root_package: &str, path: &str) -> String {
    match (root_package.is_empty(), path.is_empty()) {
        (true, _) => path.to_string(),
        (false, true) => root_package.to_string(),
        (false, false) => format!("{root_package}.{path}"),
    }
}

fn set_test_targets(config: &mut Value, targets: Vec<String>) {
    let targets = Value::Sequence(targets.into_iter().map(Value::String).collect());
    let mut gcloud = Mapping::new();
    gcloud.insert(Value::String(TEST_TARGETS_KEY.to_string()), targets);

    let mut overlay = Mapping::new();
    overlay.insert(Value::String(GCLOUD_KEY.to_string()), Value::Mapping(gcloud));
    merge(config, Value::Mapping(overlay));
}
