//! # Ingestion
//!
//! Motion recording and input collaborators.
//!
//! Responsibilities:
//! - Open a recording session only when the motion sensor is available
//! - Forward sensor events through a bounded channel (drops are counted)
//! - Stop on request or at the duration ceiling, idempotently
//! - Hand the closed `RecordingSession` to the analyzer by value
//! - Provide mock and seeded simulated collaborators
//!
//! ## Usage Example
//!
//! ```ignore
//! use ingestion::MotionRecorder;
//! use contracts::RecorderConfig;
//!
//! let recorder = MotionRecorder::new(RecorderConfig::default());
//! let recording = recorder.start(gyro_source)?;
//! // ... user walks ...
//! let session = recording.stop_and_finish().await?;
//! let verdict = gait::analyze(session);
//! ```

mod clock;
mod error;
mod metrics;
mod mock;
mod recorder;
pub mod simulated;

pub use clock::now_ms;
pub use error::{IngestionError, Result};
pub use metrics::{RecorderMetrics, RecorderMetricsSnapshot};
pub use mock::{MockMotionConfig, MockMotionSource, MotionProfile};
pub use recorder::{ActiveRecording, MotionRecorder, StopReason};
