//! JUnit XML test reports.
//!
//! Both a `<testsuites>` root and a bare `<testsuite>` root are accepted.
//! Only a `<failure>` element marks a case as failed. Retried cases may carry
//! several; the first message is kept.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

use super::errors::BitriseApiError;
use crate::domain::models::{TestCase, TestFailure, TestSuite};

#[derive(Debug, Deserialize)]
struct XmlTestSuites {
    #[serde(rename = "testsuite", default)]
    suites: Vec<XmlTestSuite>,
}

#[derive(Debug, Deserialize)]
struct XmlTestSuite {
    #[serde(rename = "@name", default)]
    name: Option<String>,
    #[serde(rename = "testcase", default)]
    cases: Vec<XmlTestCase>,
}

#[derive(Debug, Deserialize)]
struct XmlTestCase {
    #[serde(rename = "@classname", default)]
    class_name: Option<String>,
    #[serde(rename = "@name", default)]
    name: Option<String>,
    #[serde(rename = "failure", default)]
    failures: Vec<XmlFailure>,
}

#[derive(Debug, Deserialize)]
struct XmlFailure {
    #[serde(rename = "@message", default)]
    message: Option<String>,
}

/// Parse a JUnit XML document into test suites.
pub fn parse_report(xml: &str) -> Result<Vec<TestSuite>, BitriseApiError> {
    let suites = match root_element(xml)?.as_str() {
        "testsuites" => quick_xml::de::from_str::<XmlTestSuites>(xml)
            .map_err(invalid)?
            .suites,
        "testsuite" => vec![quick_xml::de::from_str::<XmlTestSuite>(xml).map_err(invalid)?],
        other => {
            return Err(BitriseApiError::InvalidReport(format!(
                "unexpected root element <{other}>"
            )))
        }
    };

    suites.into_iter().map(TestSuite::try_from).collect()
}

fn root_element(xml: &str) -> Result<String, BitriseApiError> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event().map_err(invalid)? {
            Event::Start(element) | Event::Empty(element) => {
                return Ok(String::from_utf8_lossy(element.local_name().as_ref()).into_owned())
            }
            Event::Eof => {
                return Err(BitriseApiError::InvalidReport(
                    "document has no root element".to_string(),
                ))
            }
            _ => {}
        }
    }
}

fn invalid(err: impl std::fmt::Display) -> BitriseApiError {
    BitriseApiError::InvalidReport(err.to_string())
}

impl TryFrom<XmlTestSuite> for TestSuite {
    type Error = BitriseApiError;

    fn try_from(suite: XmlTestSuite) -> Result<Self, Self::Error> {
        let test_cases = suite
            .cases
            .into_iter()
            .enumerate()
            .map(|(index, case)| {
                let missing = |attribute: &str| {
                    BitriseApiError::InvalidReport(format!(
                        "test case {index} of suite '{}' has no {attribute}",
                        suite.name.as_deref().unwrap_or_default()
                    ))
                };
                Ok(TestCase {
                    class_name: case.class_name.ok_or_else(|| missing("classname"))?,
                    method_name: case.name.ok_or_else(|| missing("name"))?,
                    failure: case.failures.into_iter().next().map(|failure| TestFailure {
                        message: failure.message,
                    }),
                })
            })
            .collect::<Result<Vec<_>, BitriseApiError>>()?;

        Ok(Self {
            name: suite.name,
            test_cases,
        })
    }
}
