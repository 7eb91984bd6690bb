use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::errors::DomainError;

/// Errors that can occur when interacting with the Bitrise API
#[derive(Error, Debug)]
pub enum BitriseApiError {
    /// Required client configuration is missing
    #[error("Missing Bitrise configuration: {0}")]
    MissingCredentials(&'static str),

    /// Invalid request parameters (HTTP 400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid or missing access token (HTTP 401/403)
    #[error("Authentication failed - check the Bitrise access token")]
    Unauthorized,

    /// Resource not found (HTTP 404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded - too many requests")]
    RateLimitExceeded,

    /// Server error from Bitrise (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Test report could not be parsed or is incomplete
    #[error("Invalid test report: {0}")]
    InvalidReport(String),

    /// Expected artifact is not attached to the build
    #[error("Artifact '{name}' not found on build {build_slug}")]
    ArtifactMissing { build_slug: String, name: String },

    /// Unexpected status code
    #[error("Unexpected response ({0}): {1}")]
    UnknownError(StatusCode, String),
}

impl BitriseApiError {
    /// Map a non-success response to an error
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status.as_u16() {
            400 => Self::InvalidRequest(body),
            401 | 403 => Self::Unauthorized,
            404 => Self::NotFound(body),
            429 => Self::RateLimitExceeded,
            500..=599 => Self::ServerError(status, body),
            _ => Self::UnknownError(status, body),
        }
    }

    /// Returns true if this error is transient and should be retried
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimitExceeded | Self::ServerError(_, _) => true,
            Self::NetworkError(err) => err.is_timeout() || err.is_connect() || err.is_request(),
            _ => false,
        }
    }

    /// Returns true if this is a permanent error that should not be retried
    pub fn is_permanent(&self) -> bool {
        !self.is_transient()
    }
}

impl From<BitriseApiError> for DomainError {
    fn from(err: BitriseApiError) -> Self {
        match err {
            BitriseApiError::InvalidReport(reason) => Self::MalformedTestReport(reason),
            BitriseApiError::ArtifactMissing { name, .. } => Self::ArtifactNotFound(name),
            BitriseApiError::NotFound(resource) => Self::ArtifactNotFound(resource),
            other => Self::CiUnavailable(other.to_string()),
        }
    }
}
