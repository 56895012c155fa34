//! Error types for figure data preparation.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for data-shaping operations.
pub type Result<T> = std::result::Result<T, FigureError>;

/// Errors raised while loading, shaping or generating figure data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FigureError {
    /// The external record for a configured run could not be opened.
    #[error("missing source for '{name}': {} does not resolve", path.display())]
    MissingSource { name: String, path: PathBuf },

    /// A named series has zero observations.
    #[error("empty input: series '{name}' has no observations")]
    EmptyInput { name: String },

    /// A shape, decay or grid parameter lies outside its domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A record file exists but one of its records cannot be read.
    #[error("malformed record in {}: {reason}", path.display())]
    MalformedRecord { path: PathBuf, reason: String },

    /// Paired sequences disagree in length.
    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    /// The requested figure has no section in the configuration.
    #[error("figure '{0}' is not configured")]
    UnknownFigureSection(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = FigureError::EmptyInput {
            name: "alr0.5".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "empty input: series 'alr0.5' has no observations"
        );

        let err = FigureError::MissingSource {
            name: "best".to_string(),
            path: PathBuf::from("runs/best.json"),
        };
        assert_eq!(
            err.to_string(),
            "missing source for 'best': runs/best.json does not resolve"
        );

        let err = FigureError::InvalidParameter("beta must be positive".to_string());
        assert_eq!(err.to_string(), "invalid parameter: beta must be positive");

        let err = FigureError::LengthMismatch {
            expected: 3,
            got: 2,
        };
        assert_eq!(err.to_string(), "length mismatch: expected 3, got 2");
    }
}
