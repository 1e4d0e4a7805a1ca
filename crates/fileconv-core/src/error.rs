//! Unified application error types for FileConv.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the `?` operator. The [`ErrorKind`] taxonomy is what
//! the HTTP layer uses to pick a status code.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The uploaded file (or the parsed document) contains nothing to convert.
    EmptyInput,
    /// The source bytes do not parse as the declared format.
    MalformedInput,
    /// No transform is registered for the requested conversion kind.
    UnsupportedConversionKind,
    /// No stored artifact exists under the requested name.
    ArtifactNotFound,
    /// The upload is larger than the configured cap.
    UpstreamLimitExceeded,
    /// The request itself is incomplete (missing multipart fields, etc.).
    InvalidRequest,
    /// A configuration error occurred.
    Configuration,
    /// Anything else, e.g. an I/O failure writing to the artifact store.
    Unclassified,
}

impl ErrorKind {
    /// Whether this kind describes a problem with the caller's input rather
    /// than with the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::MalformedInput
                | Self::UnsupportedConversionKind
                | Self::ArtifactNotFound
                | Self::UpstreamLimitExceeded
                | Self::InvalidRequest
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "EMPTY_INPUT"),
            Self::MalformedInput => write!(f, "MALFORMED_INPUT"),
            Self::UnsupportedConversionKind => write!(f, "UNSUPPORTED_CONVERSION_KIND"),
            Self::ArtifactNotFound => write!(f, "ARTIFACT_NOT_FOUND"),
            Self::UpstreamLimitExceeded => write!(f, "UPSTREAM_LIMIT_EXCEEDED"),
            Self::InvalidRequest => write!(f, "INVALID_REQUEST"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Unclassified => write!(f, "UNCLASSIFIED"),
        }
    }
}

/// The unified application error used throughout FileConv.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an empty-input error.
    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmptyInput, message)
    }

    /// Create a malformed-input error.
    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedInput, message)
    }

    /// Create an unsupported-conversion-kind error.
    pub fn unsupported_kind(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedConversionKind, message)
    }

    /// Create an artifact-not-found error.
    pub fn artifact_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ArtifactNotFound, message)
    }

    /// Create an upload-too-large error.
    pub fn limit_exceeded(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UpstreamLimitExceeded, message)
    }

    /// Create an invalid-request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an unclassified (internal) error.
    pub fn unclassified(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unclassified, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::MalformedInput,
            format!("JSON error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Unclassified, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = AppError::artifact_not_found("File not found: a.json");
        assert_eq!(err.to_string(), "ARTIFACT_NOT_FOUND: File not found: a.json");
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("disk full");
        let err = AppError::from(io);
        assert!(std::error::Error::source(&err).is_some());

        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::Unclassified);
        assert!(cloned.source.is_none());
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ErrorKind::EmptyInput.is_client_error());
        assert!(ErrorKind::ArtifactNotFound.is_client_error());
        assert!(!ErrorKind::Unclassified.is_client_error());
        assert!(!ErrorKind::Configuration.is_client_error());
    }
}
