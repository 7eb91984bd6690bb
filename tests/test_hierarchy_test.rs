//! Worked examples for the selector hierarchy built from test-method manifests.

mod common;

use common::method;
use flankci::{FilterConfig, PathWithAnnotationGroups, TestHierarchyBuilder, TestHierarchyResult};

fn group(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

fn node(path: &str, groups: Option<Vec<Vec<String>>>) -> PathWithAnnotationGroups {
    PathWithAnnotationGroups::new(path, groups)
}

fn filter(hidden: &[&str], ignored: &[&str]) -> FilterConfig {
    FilterConfig {
        hidden_annotations: group(hidden),
        ignore_tests_with_annotations: group(ignored),
        allow_testing_without_filters: false,
    }
}

#[test]
fn test_single_method_without_annotations() {
    let methods = vec![method("com.example.integration.TestClass1#test1", &[])];

    let result = TestHierarchyBuilder::new()
        .build(&methods, &FilterConfig::default())
        .unwrap();

    assert_eq!(result.root_package, "com.example.integration");
    assert!(result.annotations.is_empty());
    assert_eq!(result.packages, vec![node("", None)]);
    assert_eq!(
        result.classes,
        vec![node("TestClass1", None), node("TestClass1#test1", None)]
    );
}

#[test]
fn test_two_disjoint_packages() {
    let methods = vec![
        method(
            "com.example.integration.path1.TestClass1#test1",
            &["IntegrationAnnotation"],
        ),
        method("com.example.e2e.path2.TestClass2#test2", &["E2eAnnotation"]),
    ];

    let result = TestHierarchyBuilder::new()
        .build(&methods, &FilterConfig::default())
        .unwrap();

    let e2e = || Some(vec![group(&["E2eAnnotation"])]);
    let integration = || Some(vec![group(&["IntegrationAnnotation"])]);

    assert_eq!(result.root_package, "com.example");
    assert_eq!(result.annotations, group(&["E2eAnnotation", "IntegrationAnnotation"]));
    assert_eq!(
        result.packages,
        vec![
            node(
                "",
                Some(vec![group(&["E2eAnnotation"]), group(&["IntegrationAnnotation"])]),
            ),
            node("e2e", e2e()),
            node("e2e.path2", e2e()),
            node("integration", integration()),
            node("integration.path1", integration()),
        ]
    );
    assert_eq!(
        result.classes,
        vec![
            node("e2e.path2.TestClass2", e2e()),
            node("e2e.path2.TestClass2#test2", e2e()),
            node("integration.path1.TestClass1", integration()),
            node("integration.path1.TestClass1#test1", integration()),
        ]
    );
}

#[test]
fn test_only_ignored_method_gives_empty_result() {
    let methods = vec![method("com.example.FlakyTest#flakes", &["Ignore", "Smoke"])];

    let result = TestHierarchyBuilder::new()
        .build(&methods, &filter(&[], &["Ignore"]))
        .unwrap();

    assert_eq!(result, TestHierarchyResult::default());
}

#[test]
fn test_ignored_method_absent_from_every_list() {
    let methods = vec![
        method("com.example.login.LoginTest#logsIn", &["Smoke"]),
        method("com.example.home.HomeTest#opens", &["Ignore"]),
    ];

    let result = TestHierarchyBuilder::new()
        .build(&methods, &filter(&[], &["Ignore"]))
        .unwrap();

    assert_eq!(result.root_package, "com.example.login");
    assert_eq!(result.annotations, group(&["Smoke"]));
    let paths: Vec<&str> = result.classes.iter().map(|n| n.path.as_str()).collect();
    assert_eq!(paths, vec!["LoginTest", "LoginTest#logsIn"]);
}

#[test]
fn test_hidden_annotation_behaves_like_no_annotation() {
    let hidden = vec![
        method("com.example.login.LoginTest#logsIn", &["Internal"]),
        method("com.example.home.HomeTest#opens", &["Smoke"]),
    ];
    let plain = vec![
        method("com.example.login.LoginTest#logsIn", &[]),
        method("com.example.home.HomeTest#opens", &["Smoke"]),
    ];

    let builder = TestHierarchyBuilder::new();
    let with_hidden = builder.build(&hidden, &filter(&["Internal"], &[])).unwrap();
    let without = builder.build(&plain, &FilterConfig::default()).unwrap();

    assert_eq!(with_hidden, without);
    assert_eq!(with_hidden.annotations, group(&["Smoke"]));
    let login = with_hidden
        .classes
        .iter()
        .find(|n| n.path == "login.LoginTest")
        .unwrap();
    assert!(login.annotation_groups.is_none());
}

#[test]
fn test_distinct_groups_are_deduplicated_and_sorted() {
    let methods = vec![
        method("com.example.LoginTest#a", &["Smoke", "Regression"]),
        method("com.example.LoginTest#b", &["Regression", "Smoke"]),
        method("com.example.LoginTest#c", &["Flaky"]),
        method("com.example.LoginTest#d", &[]),
    ];

    let result = TestHierarchyBuilder::new()
        .build(&methods, &FilterConfig::default())
        .unwrap();

    let class = result.classes.iter().find(|n| n.path == "LoginTest").unwrap();
    assert_eq!(
        class.annotation_groups,
        Some(vec![group(&["Flaky"]), group(&["Regression", "Smoke"])])
    );
    let unannotated = result.classes.iter().find(|n| n.path == "LoginTest#d").unwrap();
    assert!(unannotated.annotation_groups.is_none());
}

#[test]
fn test_no_shared_segment_gives_empty_root() {
    let methods = vec![
        method("com.example.LoginTest#logsIn", &[]),
        method("org.sample.HomeTest#opens", &[]),
    ];

    let result = TestHierarchyBuilder::new()
        .build(&methods, &FilterConfig::default())
        .unwrap();

    assert_eq!(result.root_package, "");
    let packages: Vec<&str> = result.packages.iter().map(|n| n.path.as_str()).collect();
    assert_eq!(packages, vec!["", "com", "com.example", "org", "org.sample"]);
}

#[test]
fn test_malformed_identifier_fails() {
    let methods = vec![method("com.example.LoginTest", &[])];

    let err = TestHierarchyBuilder::new()
        .build(&methods, &FilterConfig::default())
        .unwrap_err();

    assert!(err.to_string().contains("com.example.LoginTest"));
}

#[test]
fn test_rebuilding_is_byte_identical() {
    let methods = vec![
        method("com.example.b.BTest#two", &["Smoke", "Large"]),
        method("com.example.a.ATest#one", &["Smoke"]),
        method("com.example.a.ATest#zero", &["Large", "Smoke"]),
    ];
    let builder = TestHierarchyBuilder::new();

    let first = serde_json::to_string(&builder.build(&methods, &FilterConfig::default()).unwrap())
        .unwrap();
    let second = serde_json::to_string(&builder.build(&methods, &FilterConfig::default()).unwrap())
        .unwrap();

    assert_eq!(first, second);
}
