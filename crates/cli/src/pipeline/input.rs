//! JSON input harness for the `analyze` command.
//!
//! ```json
//! {
//!   "faces": [{ "eyes_open": { "value": false, "confidence": 80.0 } }],
//!   "heart_rate": { "bpm": 96.0 },
//!   "gyroscope": {
//!     "started_at_ms": 0,
//!     "samples": [{ "x": 0.1, "y": 0.0, "z": 0.2, "timestamp_ms": 20 }]
//!   }
//! }
//! ```
//!
//! A missing `heart_rate` or `gyroscope` block means the signal was not
//! collected; `"available": false` marks a gyroscope that could not be opened.

use std::path::Path;

use contracts::{
    AngularVelocity, AnalysisError, FaceAttributeProvider, FaceAttributes, HeartRateReading,
    HeartRateSource, MotionSample, RecordingSession,
};
use serde::Deserialize;
use tracing::debug;

use super::MotionInput;
use crate::error::{CliError, Result};

/// Signals captured elsewhere and replayed through the pipeline
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignalInput {
    /// Detector response; empty means no face was found
    #[serde(default)]
    pub faces: Vec<FaceAttributes>,
    #[serde(default)]
    pub heart_rate: Option<HeartRateReading>,
    #[serde(default)]
    pub gyroscope: Option<GyroInput>,
}

/// Recorded gyroscope session
#[derive(Debug, Clone, Deserialize)]
pub struct GyroInput {
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub started_at_ms: i64,
    #[serde(default)]
    pub samples: Vec<GyroSample>,
}

fn default_available() -> bool {
    true
}

/// One gyroscope reading, rad/s
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GyroSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub timestamp_ms: i64,
}

impl GyroInput {
    pub fn into_motion_input(self) -> MotionInput {
        if !self.available {
            return MotionInput::Unavailable;
        }
        let samples = self
            .samples
            .into_iter()
            .map(|s| MotionSample::new(AngularVelocity::new(s.x, s.y, s.z), s.timestamp_ms))
            .collect();
        MotionInput::Session(RecordingSession::closed(self.started_at_ms, samples))
    }
}

impl SignalInput {
    /// Split into pipeline collaborators
    pub fn into_parts(self) -> (StaticFaces, StaticHeartRate, MotionInput) {
        let motion = self
            .gyroscope
            .map(GyroInput::into_motion_input)
            .unwrap_or(MotionInput::Skip);
        (
            StaticFaces(self.faces),
            StaticHeartRate(self.heart_rate),
            motion,
        )
    }
}

/// Load a signal input file
pub fn load_input(path: &Path) -> Result<SignalInput> {
    if !path.exists() {
        return Err(CliError::file_not_found(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let input: SignalInput = serde_json::from_str(&content)
        .map_err(|e| CliError::input_parse(path.display().to_string(), e.to_string()))?;

    debug!(
        faces = input.faces.len(),
        heart_rate = input.heart_rate.is_some(),
        gyroscope = input.gyroscope.is_some(),
        "signal input loaded"
    );
    Ok(input)
}

/// Face provider answering with a fixed detector response
#[derive(Debug, Clone)]
pub struct StaticFaces(pub Vec<FaceAttributes>);

impl FaceAttributeProvider for StaticFaces {
    fn name(&self) -> &str {
        "input-file"
    }

    async fn detect(
        &self,
        _image: &[u8],
    ) -> std::result::Result<Vec<FaceAttributes>, AnalysisError> {
        Ok(self.0.clone())
    }
}

/// Heart-rate source answering with a fixed reading
#[derive(Debug, Clone, Copy)]
pub struct StaticHeartRate(pub Option<HeartRateReading>);

impl HeartRateSource for StaticHeartRate {
    fn name(&self) -> &str {
        "input-file"
    }

    async fn latest(&self) -> std::result::Result<Option<HeartRateReading>, AnalysisError> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_full_input() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "faces": [{{ "eyes_open": {{ "value": true, "confidence": 97.0 }} }}],
                "heart_rate": {{ "bpm": 72.0 }},
                "gyroscope": {{
                    "started_at_ms": 1000,
                    "samples": [{{ "x": 3.0, "y": 4.0, "z": 0.0, "timestamp_ms": 1020 }}]
                }}
            }}"#
        )
        .unwrap();

        let input = load_input(file.path()).unwrap();
        assert_eq!(input.faces.len(), 1);
        assert_eq!(input.heart_rate.map(|r| r.bpm), Some(72.0));

        let (_, _, motion) = input.into_parts();
        match motion {
            MotionInput::Session(session) => {
                assert_eq!(session.started_at_ms(), 1000);
                assert_eq!(session.samples()[0].magnitude(), 5.0);
                assert!(!session.is_active());
            }
            other => panic!("unexpected motion input: {other:?}"),
        }
    }

    #[test]
    fn test_missing_blocks() {
        let input: SignalInput = serde_json::from_str("{}").unwrap();
        assert!(input.faces.is_empty());
        let (_, heart, motion) = input.into_parts();
        assert!(heart.0.is_none());
        assert!(matches!(motion, MotionInput::Skip));
    }

    #[test]
    fn test_unavailable_gyroscope() {
        let input: SignalInput =
            serde_json::from_str(r#"{ "gyroscope": { "available": false } }"#).unwrap();
        let (_, _, motion) = input.into_parts();
        assert!(matches!(motion, MotionInput::Unavailable));
    }

    #[test]
    fn test_missing_file() {
        let err = load_input(Path::new("/nonexistent/signals.json")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = load_input(file.path()).unwrap_err();
        assert!(matches!(err, CliError::InputParse { .. }));
    }
}
