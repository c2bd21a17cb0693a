//! Motion data - Ingestion output, Gait input
//!
//! Gyroscope samples and the recording session that owns them.

use serde::{Deserialize, Serialize};

/// Angular velocity vector (rad/s)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AngularVelocity {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AngularVelocity {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm
    pub fn magnitude(&self) -> f32 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }
}

/// Raw event pushed by a motion sensor feed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionEvent {
    /// Angular velocity (rad/s)
    pub angular_velocity: AngularVelocity,

    /// Event timestamp (Unix milliseconds)
    pub timestamp_ms: i64,
}

/// Timestamped gyroscope sample
///
/// Immutable once recorded; the magnitude is computed at construction.
/// Deserialization goes through [`MotionEvent`], a stored magnitude is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "MotionEvent")]
pub struct MotionSample {
    angular_velocity: AngularVelocity,
    magnitude: f32,
    timestamp_ms: i64,
}

impl MotionSample {
    pub fn new(angular_velocity: AngularVelocity, timestamp_ms: i64) -> Self {
        Self {
            angular_velocity,
            magnitude: angular_velocity.magnitude(),
            timestamp_ms,
        }
    }

    pub fn angular_velocity(&self) -> AngularVelocity {
        self.angular_velocity
    }

    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }
}

impl From<MotionEvent> for MotionSample {
    fn from(event: MotionEvent) -> Self {
        Self::new(event.angular_velocity, event.timestamp_ms)
    }
}

/// One gyroscope recording
///
/// Created on start-of-recording, appended to while active, then closed and
/// handed to the analyzer by value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingSession {
    samples: Vec<MotionSample>,
    started_at_ms: i64,
    is_active: bool,
}

impl RecordingSession {
    /// Open an empty, active session
    pub fn start(started_at_ms: i64) -> Self {
        Self {
            samples: Vec::new(),
            started_at_ms,
            is_active: true,
        }
    }

    /// Build an already closed session (replayed or synthetic data)
    pub fn closed(started_at_ms: i64, samples: Vec<MotionSample>) -> Self {
        Self {
            samples,
            started_at_ms,
            is_active: false,
        }
    }

    /// Append a sample; returns `false` and drops it once the session is closed
    pub fn push(&mut self, sample: MotionSample) -> bool {
        if !self.is_active {
            return false;
        }
        self.samples.push(sample);
        true
    }

    /// Close the session; further pushes are dropped
    pub fn close(&mut self) {
        self.is_active = false;
    }

    pub fn samples(&self) -> &[MotionSample] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<MotionSample> {
        self.samples
    }

    pub fn started_at_ms(&self) -> i64 {
        self.started_at_ms
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// `last sample time - started_at`, `None` when empty
    pub fn duration_ms(&self) -> Option<i64> {
        self.samples
            .last()
            .map(|last| last.timestamp_ms() - self.started_at_ms)
    }
}

/// Gait stability verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityVerdict {
    Stable,
    SlightlyUnstable,
    Unstable,
    /// Recording empty or shorter than the minimum duration
    InsufficientData,
    /// Motion sensor missing or permission denied
    SensorUnavailable,
}

impl StabilityVerdict {
    /// Severity rank for the three classified verdicts
    pub fn severity(&self) -> Option<u8> {
        match self {
            Self::Stable => Some(0),
            Self::SlightlyUnstable => Some(1),
            Self::Unstable => Some(2),
            Self::InsufficientData | Self::SensorUnavailable => None,
        }
    }

    /// Whether the verdict carries a usable gait classification
    pub fn is_classified(&self) -> bool {
        self.severity().is_some()
    }
}
