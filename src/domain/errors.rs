//! Domain errors for the flankci dashboard backend.

use thiserror::Error;

/// Domain-level errors surfaced to the CLI and HTTP layers.
///
/// The mapping engines only ever produce the `Malformed*` variants; the
/// remaining variants come from orchestration around them.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Malformed test identifier '{identifier}': {reason}")]
    MalformedTestIdentifier { identifier: String, reason: String },

    #[error("Malformed test report: {0}")]
    MalformedTestReport(String),

    #[error("No packages, classes or annotations selected and testing without filters is disabled")]
    NoTestFilters,

    #[error("{0} must exist")]
    MissingFormField(&'static str),

    #[error("Invalid option selection: {0}")]
    InvalidOption(String),

    #[error("CI rejected build (status: {0})")]
    TriggerRejected(String),

    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),

    #[error("CI provider unavailable: {0}")]
    CiUnavailable(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub(crate) fn malformed_identifier(identifier: &str, reason: impl Into<String>) -> Self {
        Self::MalformedTestIdentifier {
            identifier: identifier.to_string(),
            reason: reason.into(),
        }
    }

    /// True for failures caused by bad caller input rather than by the CI provider.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedTestIdentifier { .. }
                | Self::NoTestFilters
                | Self::MissingFormField(_)
                | Self::InvalidOption(_)
        )
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for DomainError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_form_field_message() {
        let err = DomainError::MissingFormField("Branch");
        assert_eq!(err.to_string(), "Branch must exist");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(DomainError::NoTestFilters.is_client_error());
        assert!(DomainError::malformed_identifier("x", "no class separator").is_client_error());
        assert!(!DomainError::CiUnavailable("down".to_string()).is_client_error());
        assert!(!DomainError::MalformedTestReport("bad".to_string()).is_client_error());
    }
}
