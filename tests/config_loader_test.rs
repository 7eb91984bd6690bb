//! Configuration loading from YAML files and environment overrides.

use std::io::Write;

use flankci::domain::models::TestOption;
use flankci::ConfigLoader;
use tempfile::NamedTempFile;

const CONFIG: &str = r#"
ci:
  app_id: my-app
  test_apk_source_workflow: build-test-apks
  test_trigger_workflow: run-flank
  retry:
    max_retries: 5
test_data:
  hidden_annotations: [Internal]
  ignore_tests_with_annotations: [Ignore]
  flank_config:
    common_yaml:
      - |
        gcloud:
          device:
            - model: Pixel2
    annotation_based_yaml:
      options:
        - annotation: Large
          yaml: ["flank:\n  shard-time: 300"]
      fallback_yaml: ["flank:\n  shard-time: 120"]
  options:
    - type: checkbox
      label: Record video
      checked_yaml: ["gcloud:\n  record-video: true"]
    - type: drop_down
      label: Devices
      values:
        - label: Phone
          yaml: ["gcloud:\n  device:\n    - model: Pixel2"]
        - label: Tablet
          yaml: ["gcloud:\n  device:\n    - model: Nexus9"]
server:
  port: 3000
logging:
  level: debug
  format: json
"#;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// Environment variables that would leak into the loader from the host
const UNSET: [&str; 4] = [
    "BITRISE_TOKEN",
    "FLANKCI_SERVER__PORT",
    "FLANKCI_CI__APP_ID",
    "FLANKCI_LOGGING__LEVEL",
];

#[test]
fn test_load_from_file() {
    let file = write_config(CONFIG);

    let config = temp_env::with_vars_unset(UNSET, || ConfigLoader::load_from_file(file.path()))
        .unwrap();

    assert_eq!(config.ci.app_id, "my-app");
    assert_eq!(config.ci.base_url, "https://api.bitrise.io/v0.1");
    assert_eq!(config.ci.retry.max_retries, 5);
    assert_eq!(config.ci.retry.initial_backoff_ms, 500);
    assert_eq!(config.test_data.hidden_annotations, vec!["Internal"]);
    assert!(!config.test_data.allow_testing_without_filters);
    assert_eq!(config.test_data.flank_config.annotation_based_yaml.options.len(), 1);
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.logging.format, "json");

    assert_eq!(config.test_data.options.len(), 2);
    assert!(matches!(
        &config.test_data.options[1],
        TestOption::DropDown { values, .. } if values.len() == 2
    ));
}

#[test]
fn test_environment_overrides_file() {
    let file = write_config(CONFIG);

    let config = temp_env::with_vars(
        [
            ("FLANKCI_SERVER__PORT", Some("9090")),
            ("FLANKCI_CI__APP_ID", Some("other-app")),
            ("BITRISE_TOKEN", Some("secret-token")),
            ("FLANKCI_LOGGING__LEVEL", None),
        ],
        || ConfigLoader::load_from_file(file.path()),
    )
    .unwrap();

    assert_eq!(config.server.port, 9090);
    assert_eq!(config.ci.app_id, "other-app");
    assert_eq!(config.ci.token, "secret-token");
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_token_is_redacted_in_debug_output() {
    let file = write_config(CONFIG);

    let config = temp_env::with_vars([("BITRISE_TOKEN", Some("secret-token"))], || {
        ConfigLoader::load_from_file(file.path())
    })
    .unwrap();

    let debug = format!("{:?}", config.ci);
    assert!(!debug.contains("secret-token"));
    assert!(debug.contains("[REDACTED]"));
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases = [
        "logging:\n  level: verbose\n",
        "logging:\n  format: xml\n",
        "server:\n  port: 0\n",
        "ci:\n  timeout_secs: 0\n",
        "ci:\n  retry:\n    initial_backoff_ms: 5000\n    max_backoff_ms: 1000\n",
        "test_data:\n  options:\n    - type: drop_down\n      label: Devices\n      values: []\n",
        "test_data:\n  options:\n    - type: checkbox\n      label: ' '\n",
    ];

    for contents in cases {
        let file = write_config(contents);
        let result = temp_env::with_vars_unset(UNSET, || ConfigLoader::load_from_file(file.path()));
        assert!(result.is_err(), "accepted invalid config:\n{contents}");
    }
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConfigLoader::load_from_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}
