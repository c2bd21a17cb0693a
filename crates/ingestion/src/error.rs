//! Ingestion error types

use thiserror::Error;

/// Recorder errors
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Sensor missing or permission denied; no session was opened
    #[error("motion sensor {source_id} is unavailable")]
    SensorUnavailable {
        /// Source ID
        source_id: String,
    },

    /// A recording is already in progress on this recorder
    #[error("a motion recording is already in progress")]
    AlreadyRecording,

    /// Collector task panicked or was cancelled
    #[error("motion collector failed: {message}")]
    CollectorFailed {
        /// Error message
        message: String,
    },
}

/// Ingestion Result type alias
pub type Result<T> = std::result::Result<T, IngestionError>;
