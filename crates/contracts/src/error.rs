//! Layered error definitions
//!
//! Categorized by source: attribute / fusion / config / collaborator

use thiserror::Error;

use crate::SignalKind;

/// Unified error type
///
/// `InsufficientData` and `SensorUnavailable` are deliberately absent: they
/// are `StabilityVerdict` outcomes, not failures.
#[derive(Debug, Error)]
pub enum AnalysisError {
    // ===== Scorer Errors =====
    /// Upstream detector returned zero faces
    #[error("no face detected")]
    NoFaceDetected,

    /// Malformed externally supplied attribute
    #[error("invalid face attribute '{field}': {message}")]
    InvalidAttribute { field: String, message: String },

    // ===== Fusion Errors =====
    /// Fusion precondition violation, no result may be shown
    #[error("no signals available for fusion")]
    NoSignalsAvailable,

    /// Partial score outside [0, 100] or not finite
    #[error("invalid {signal} partial score: {value}")]
    InvalidScore { signal: SignalKind, value: f32 },

    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Collaborator Errors =====
    /// Face-attribute service or health-data source failure
    #[error("collaborator '{name}' failed: {message}")]
    Collaborator { name: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Create invalid attribute error
    pub fn invalid_attribute(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create collaborator error
    pub fn collaborator(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Collaborator {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Whether the failed signal may be dropped instead of aborting the analysis
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Collaborator { .. } | Self::Io(_))
    }
}
