//! Error types for the feedback analyzer
//!
//! This module provides error handling using thiserror for structured
//! error definitions and anyhow for error propagation at the CLI edge.
//!
//! Malformed feedback values and missing form labels are not errors: the
//! classifier and extractor recover from them locally. Only I/O, corrupt
//! persisted state, and unusable input tables surface here.

use thiserror::Error;

/// Main error type for feedback analyzer operations
#[derive(Error, Debug)]
pub enum FeedbackError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The cumulative store exists but cannot be parsed.
    ///
    /// Never swallowed: dropping prior records silently is worse than failing.
    #[error("Cumulative store at {path} is corrupt: {reason}")]
    CorruptStore { path: String, reason: String },

    /// Tabular input lacks a required column
    #[error("Input is missing required column: {0}")]
    MissingColumn(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    /// Invalid input supplied by the caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for feedback analyzer operations
pub type Result<T> = std::result::Result<T, FeedbackError>;

/// Convert anyhow::Error to FeedbackError
impl From<anyhow::Error> for FeedbackError {
    fn from(err: anyhow::Error) -> Self {
        FeedbackError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FeedbackError::MissingColumn("Feedback".to_string());
        assert_eq!(err.to_string(), "Input is missing required column: Feedback");

        let err = FeedbackError::CorruptStore {
            path: "store.csv".to_string(),
            reason: "bad header".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cumulative store at store.csv is corrupt: bad header"
        );
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: FeedbackError = io_err.into();
        assert!(matches!(err, FeedbackError::Io(_)));

        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: FeedbackError = json_err.into();
        assert!(matches!(err, FeedbackError::Serialization(_)));

        let err: FeedbackError = anyhow::anyhow!("wrapped").into();
        assert_eq!(err.to_string(), "wrapped");
    }
}
