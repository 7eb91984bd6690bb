//! Test methods discovered in an instrumented test artifact.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// Separator between the class and the method in a test identifier.
pub const METHOD_SEPARATOR: char = '#';

/// Separator between package segments.
pub const PACKAGE_SEPARATOR: char = '.';

/// A fully-qualified test identifier (`a.b.c.ClassName#methodName`) and the
/// names of the annotations attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTestMethod {
    pub name: String,
    #[serde(default)]
    pub annotations: BTreeSet<String>,
}

impl RawTestMethod {
    pub fn new<I, S>(name: impl Into<String>, annotations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            annotations: annotations.into_iter().map(Into::into).collect(),
        }
    }
}

/// A test identifier split into its package, class and method parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedTestName<'a> {
    /// Dotted package path, empty for the default package.
    pub package: &'a str,
    pub class: &'a str,
    pub method: &'a str,
}

impl<'a> QualifiedTestName<'a> {
    /// Split `identifier`, failing on anything that cannot be grouped reliably.
    pub fn parse(identifier: &'a str) -> DomainResult<Self> {
        let (qualified_class, method) = identifier
            .split_once(METHOD_SEPARATOR)
            .ok_or_else(|| DomainError::malformed_identifier(identifier, "missing '#' class separator"))?;

        let (package, class) = qualified_class
            .rsplit_once(PACKAGE_SEPARATOR)
            .unwrap_or(("", qualified_class));

        if class.is_empty() {
            return Err(DomainError::malformed_identifier(identifier, "empty class name"));
        }
        if method.is_empty() {
            return Err(DomainError::malformed_identifier(identifier, "empty method name"));
        }
        if qualified_class.split(PACKAGE_SEPARATOR).any(str::is_empty) {
            return Err(DomainError::malformed_identifier(identifier, "empty package segment"));
        }

        Ok(Self {
            package,
            class,
            method,
        })
    }

    /// Package segments, empty for the default package.
    pub fn package_segments(&self) -> Vec<&'a str> {
        if self.package.is_empty() {
            Vec::new()
        } else {
            self.package.split(PACKAGE_SEPARATOR).collect()
        }
    }
}
