//! Unified error type for the transform layer.
//!
//! Parse, render and lookup failures are consolidated into a single
//! `ConversionError` enum that maps cleanly to
//! `fileconv_core::error::AppError`.

use fileconv_core::error::AppError;
use fileconv_core::types::ConversionKind;
use thiserror::Error;

/// Unified error type for all transform operations.
#[derive(Debug, Error)]
pub enum ConversionError {
    // --- Input errors ---
    /// The document parsed but holds nothing to convert.
    #[error("{reason}")]
    EmptyInput {
        /// What was empty.
        reason: String,
    },

    /// The bytes are not well-formed for the source format.
    #[error("Malformed {format} input: {reason}")]
    MalformedInput {
        /// Source format name (e.g. "CSV").
        format: &'static str,
        /// Parser diagnostic.
        reason: String,
    },

    // --- Lookup errors ---
    /// No transform is registered for the kind.
    #[error("Unsupported conversion type: {kind}")]
    UnsupportedKind {
        /// The kind that has no registry entry.
        kind: ConversionKind,
    },

    // --- Output errors ---
    /// The target document could not be produced.
    #[error("Failed to render {format} output: {reason}")]
    Render {
        /// Target format name (e.g. "XLSX").
        format: &'static str,
        /// Writer diagnostic.
        reason: String,
    },
}

impl ConversionError {
    /// Shorthand for [`ConversionError::MalformedInput`].
    pub fn malformed(format: &'static str, reason: impl ToString) -> Self {
        Self::MalformedInput {
            format,
            reason: reason.to_string(),
        }
    }

    /// Shorthand for [`ConversionError::Render`].
    pub fn render(format: &'static str, reason: impl ToString) -> Self {
        Self::Render {
            format,
            reason: reason.to_string(),
        }
    }

    /// Shorthand for [`ConversionError::EmptyInput`].
    pub fn empty(reason: impl Into<String>) -> Self {
        Self::EmptyInput {
            reason: reason.into(),
        }
    }
}

/// Result alias for transform operations.
pub type ConversionResult<T> = Result<T, ConversionError>;

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match &err {
            ConversionError::EmptyInput { .. } => AppError::empty_input(err.to_string()),
            ConversionError::MalformedInput { .. } => AppError::malformed_input(err.to_string()),
            ConversionError::UnsupportedKind { .. } => AppError::unsupported_kind(err.to_string()),
            ConversionError::Render { .. } => AppError::unclassified(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use fileconv_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_maps_to_app_error_kinds() {
        let cases = [
            (ConversionError::empty("JSON array is empty"), ErrorKind::EmptyInput),
            (ConversionError::malformed("CSV", "bad quote"), ErrorKind::MalformedInput),
            (
                ConversionError::UnsupportedKind {
                    kind: ConversionKind::JsonToPdf,
                },
                ErrorKind::UnsupportedConversionKind,
            ),
            (ConversionError::render("PDF", "font"), ErrorKind::Unclassified),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).kind, expected);
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ConversionError::malformed("XML", "unexpected EOF").to_string(),
            "Malformed XML input: unexpected EOF"
        );
        assert_eq!(
            ConversionError::empty("JSON array is empty").to_string(),
            "JSON array is empty"
        );
    }
}
