//! Package/class/annotation hierarchy of the test methods in a test artifact.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::errors::DomainResult;
use crate::domain::models::annotations::{self, AnnotationGroup, AnnotationGroups};
use crate::domain::models::test_method::{METHOD_SEPARATOR, PACKAGE_SEPARATOR};
use crate::domain::models::{
    FilterConfig, PathWithAnnotationGroups, QualifiedTestName, RawTestMethod, TestHierarchyResult,
};

/// Builds the selector hierarchy shown to engineers picking tests to run.
#[derive(Debug, Clone, Default)]
pub struct TestHierarchyBuilder;

/// A method that survived filtering, with hidden annotations stripped.
struct RetainedMethod<'a> {
    name: QualifiedTestName<'a>,
    group: AnnotationGroup,
}

impl TestHierarchyBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the hierarchy for `methods` under `config`.
    ///
    /// Methods carrying an ignored annotation are dropped before anything
    /// else happens. Hidden annotations are then stripped from the rest.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MalformedTestIdentifier`] when a retained
    /// method's name has no `#` separator or an empty class, method or
    /// package segment.
    ///
    /// [`DomainError::MalformedTestIdentifier`]: crate::domain::DomainError::MalformedTestIdentifier
    pub fn build(
        &self,
        methods: &[RawTestMethod],
        config: &FilterConfig,
    ) -> DomainResult<TestHierarchyResult> {
        let retained = retain(methods, config)?;
        if retained.is_empty() {
            tracing::debug!(methods = methods.len(), "no test methods retained");
            return Ok(TestHierarchyResult::default());
        }

        let root_segments = common_package_prefix(&retained);
        let root_package = root_segments.join(".");

        let mut packages: BTreeMap<String, AnnotationGroups> = BTreeMap::new();
        let mut classes: BTreeMap<String, AnnotationGroups> = BTreeMap::new();

        for method in &retained {
            let segments = method.name.package_segments();
            let relative = &segments[root_segments.len()..];
            for depth in 0..=relative.len() {
                packages
                    .entry(relative[..depth].join("."))
                    .or_default()
                    .insert(&method.group);
            }

            let class_path = if relative.is_empty() {
                method.name.class.to_string()
            } else {
                format!(
                    "{}{PACKAGE_SEPARATOR}{}",
                    relative.join("."),
                    method.name.class
                )
            };
            let method_path = format!("{class_path}{METHOD_SEPARATOR}{}", method.name.method);

            classes.entry(class_path).or_default().insert(&method.group);
            classes.entry(method_path).or_default().insert(&method.group);
        }

        tracing::debug!(
            methods = methods.len(),
            retained = retained.len(),
            root_package = %root_package,
            packages = packages.len(),
            classes = classes.len(),
            "built test hierarchy"
        );

        Ok(TestHierarchyResult {
            root_package,
            annotations: annotations::distinct_sorted(
                retained.iter().flat_map(|method| method.group.iter().cloned()),
            ),
            packages: into_nodes(packages),
            classes: into_nodes(classes),
        })
    }
}

fn retain<'a>(
    methods: &'a [RawTestMethod],
    config: &FilterConfig,
) -> DomainResult<Vec<RetainedMethod<'a>>> {
    let ignored: BTreeSet<&str> = config
        .ignore_tests_with_annotations
        .iter()
        .map(String::as_str)
        .collect();
    let hidden: BTreeSet<&str> = config.hidden_annotations.iter().map(String::as_str).collect();

    methods
        .iter()
        .filter(|method| {
            !method
                .annotations
                .iter()
                .any(|annotation| ignored.contains(annotation.as_str()))
        })
        .map(|method| -> DomainResult<RetainedMethod<'a>> {
            let name = QualifiedTestName::parse(&method.name)?;
            let group = annotations::to_group(
                method
                    .annotations
                    .iter()
                    .filter(|annotation| !hidden.contains(annotation.as_str())),
            );
            Ok(RetainedMethod { name, group })
        })
        .collect()
}

/// Longest run of leading package segments shared by every method.
fn common_package_prefix<'a>(methods: &[RetainedMethod<'a>]) -> Vec<&'a str> {
    let mut iter = methods.iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut prefix = first.name.package_segments();
    for method in iter {
        let segments = method.name.package_segments();
        let shared = prefix
            .iter()
            .zip(&segments)
            .take_while(|(a, b)| a == b)
            .count();
        prefix.truncate(shared);
        if prefix.is_empty() {
            break;
        }
    }
    prefix
}

fn into_nodes(paths: BTreeMap<String, AnnotationGroups>) -> Vec<PathWithAnnotationGroups> {
    paths
        .into_iter()
        .map(|(path, groups)| PathWithAnnotationGroups::new(path, groups.into_option()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    fn method(name: &str, annotations: &[&str]) -> RawTestMethod {
        RawTestMethod::new(name, annotations.iter().copied())
    }

    fn node(path: &str, groups: Option<Vec<Vec<&str>>>) -> PathWithAnnotationGroups {
        PathWithAnnotationGroups::new(
            path,
            groups.map(|groups| {
                groups
                    .into_iter()
                    .map(|group| group.into_iter().map(str::to_string).collect())
                    .collect()
            }),
        )
    }

    fn build(methods: &[RawTestMethod], config: &FilterConfig) -> TestHierarchyResult {
        TestHierarchyBuilder::new().build(methods, config).unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(build(&[], &FilterConfig::default()), TestHierarchyResult::default());
    }

    #[test]
    fn test_single_method_root_is_its_package() {
        let result = build(
            &[method("com.example.integration.TestClass1#test1", &[])],
            &FilterConfig::default(),
        );
        assert_eq!(result.root_package, "com.example.integration");
        assert!(result.annotations.is_empty());
        assert_eq!(result.packages, vec![node("", None)]);
        assert_eq!(
            result.classes,
            vec![node("TestClass1", None), node("TestClass1#test1", None)]
        );
    }

    #[test]
    fn test_root_compares_whole_segments() {
        let result = build(
            &[
                method("com.example.ATest#a", &[]),
                method("com.exampleX.BTest#b", &[]),
            ],
            &FilterConfig::default(),
        );
        assert_eq!(result.root_package, "com");
        let paths: Vec<&str> = result.packages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["", "example", "exampleX"]);
    }

    #[test]
    fn test_no_common_segments_yields_empty_root() {
        let result = build(
            &[method("org.ATest#a", &[]), method("com.BTest#b", &[])],
            &FilterConfig::default(),
        );
        assert_eq!(result.root_package, "");
        let classes: Vec<&str> = result.classes.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(classes, vec!["com.BTest", "com.BTest#b", "org.ATest", "org.ATest#a"]);
    }

    #[test]
    fn test_default_package_methods() {
        let result = build(
            &[method("ATest#a", &["Smoke"]), method("com.BTest#b", &[])],
            &FilterConfig::default(),
        );
        assert_eq!(result.root_package, "");
        assert_eq!(
            result.packages,
            vec![node("", Some(vec![vec!["Smoke"]])), node("com", None)]
        );
        assert_eq!(result.classes[0], node("ATest", Some(vec![vec!["Smoke"]])));
    }

    #[test]
    fn test_class_groups_collect_distinct_method_combinations() {
        let result = build(
            &[
                method("com.example.ATest#a", &["Slow", "Flaky"]),
                method("com.example.ATest#b", &["Flaky", "Slow"]),
                method("com.example.ATest#c", &["Smoke"]),
                method("com.example.ATest#d", &[]),
            ],
            &FilterConfig::default(),
        );
        assert_eq!(result.annotations, vec!["Flaky", "Slow", "Smoke"]);
        assert_eq!(
            result.classes[0],
            node("ATest", Some(vec![vec!["Flaky", "Slow"], vec!["Smoke"]]))
        );
        assert_eq!(result.classes[4], node("ATest#d", None));
    }

    #[test]
    fn test_hidden_annotations_are_stripped() {
        let config = FilterConfig {
            hidden_annotations: vec!["Hidden".to_string()],
            ..Default::default()
        };
        let hidden = build(&[method("com.example.ATest#a", &["Hidden"])], &config);
        let plain = build(&[method("com.example.ATest#a", &[])], &config);
        assert_eq!(hidden, plain);
    }

    #[test]
    fn test_ignore_wins_over_hidden() {
        let config = FilterConfig {
            hidden_annotations: vec!["Both".to_string()],
            ignore_tests_with_annotations: vec!["Both".to_string()],
            ..Default::default()
        };
        let result = build(
            &[
                method("com.example.ATest#a", &["Both"]),
                method("com.example.BTest#b", &[]),
            ],
            &config,
        );
        let classes: Vec<&str> = result.classes.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(classes, vec!["BTest", "BTest#b"]);
    }

    #[test]
    fn test_ignored_methods_are_not_parsed() {
        let config = FilterConfig {
            ignore_tests_with_annotations: vec!["Ignore".to_string()],
            ..Default::default()
        };
        let result = TestHierarchyBuilder::new().build(&[method("not-a-test", &["Ignore"])], &config);
        assert_eq!(result.unwrap(), TestHierarchyResult::default());
    }

    #[test]
    fn test_malformed_identifier_fails() {
        let err = TestHierarchyBuilder::new()
            .build(&[method("com.example.ATest.a", &[])], &FilterConfig::default())
            .unwrap_err();
        assert!(matches!(err, DomainError::MalformedTestIdentifier { .. }));
    }
}
