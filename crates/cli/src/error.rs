//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Input or configuration file not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Signal input file could not be parsed
    #[error("Failed to parse input {path}: {message}")]
    InputParse { path: String, message: String },

    /// Fusion had nothing to work with
    #[error("No usable signal: face, heart rate and gyroscope were all unavailable")]
    NoSignals,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn input_parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InputParse {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
